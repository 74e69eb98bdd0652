use std::sync::Arc;

use service::{PersonRepository, PersonStore};

/// How absolute resource links are built when the request gives no better hint.
#[derive(Clone, Debug)]
pub struct LinkConfig {
    /// Configured public base such as `https://people.example.com`; wins over request headers.
    pub public_base_url: Option<String>,
    /// `host:port` used when the request carries no `Host` header.
    pub fallback_authority: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { public_base_url: None, fallback_authority: "localhost".into() }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub persons: Arc<dyn PersonRepository>,
    pub links: LinkConfig,
}

impl ServerState {
    pub fn new(persons: Arc<dyn PersonRepository>, links: LinkConfig) -> Self {
        Self { persons, links }
    }

    /// Fresh state over the seeded in-memory store.
    pub fn seeded(links: LinkConfig) -> Self {
        let store: Arc<dyn PersonRepository> = PersonStore::seeded();
        Self::new(store, links)
    }
}
