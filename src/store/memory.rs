use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentStore, StoreError};

/// In-memory [`DocumentStore`] substitute. Keeps whole documents per
/// collection so tests can assert on exactly what would have been persisted.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
}

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Value,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .expect("store lock poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .lock()
            .expect("store lock poisoned")
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields: document,
            });
        Ok(id)
    }
}
