//! # In-Memory Key-Value Store
//!
//! Contract-faithful in-memory implementation of [`KeyValueStore`]: absent
//! keys read as empty bytes, writes replace whole values, and there is no
//! multi-key atomicity. Used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::StoreError;
use crate::ports::KeyValueStore;

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored bytes, `None` if the key was never written.
    ///
    /// Test inspection hatch; the port itself cannot distinguish "absent"
    /// from "empty".
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Pre-load an entry, bypassing the registry. For tests that need a
    /// broken or foreign value in place.
    pub async fn seed(&self, key: &str, value: Vec<u8>) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    /// Number of stored entries.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
