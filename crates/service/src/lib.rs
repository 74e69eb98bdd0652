//! Service layer for the person directory.
//! - Owns the person collection behind a repository trait.
//! - Defines explicit request schemas and validates them before construction.
//! - Reports failures through [`errors::ServiceError`].

pub mod errors;
pub mod person;

pub use errors::ServiceError;
pub use person::{
    domain::{CreatePersonInput, Person, UpdatePersonInput},
    repository::PersonRepository,
    store::PersonStore,
};
