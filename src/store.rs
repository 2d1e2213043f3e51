mod firestore;
mod memory;

pub use firestore::FirestoreStore;
pub use memory::InMemoryStore;

use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to reach the document store")]
    Transport(#[from] reqwest::Error),
    #[error("The document store rejected the write: {0}")]
    Rejected(String),
}

/// Capability interface over the persistence backend: create a document in a
/// named collection and get back the store-assigned identifier. Handlers
/// depend on this trait so they can run against an in-memory substitute.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> Result<String, StoreError>;
}
