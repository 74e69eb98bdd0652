use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::person::domain::{CreatePersonInput, Person, UpdatePersonInput};

/// Storage abstraction for person records.
///
/// Implementations must make each call atomic with respect to the others:
/// id assignment in `create` and the filter in `delete` happen under one lock.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All records in storage order.
    async fn list(&self) -> Vec<Person>;
    async fn get(&self, id: u64) -> Result<Person, ServiceError>;
    async fn create(&self, input: CreatePersonInput) -> Result<Person, ServiceError>;
    async fn update(&self, id: u64, input: UpdatePersonInput) -> Result<Person, ServiceError>;
    /// Remove every record with `id`. Returns whether anything was removed.
    async fn delete(&self, id: u64) -> Result<bool, ServiceError>;
}
