//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use eventgrid_core::storage::{BlobStore, Result};

/// In-memory storage backend.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.read().await;
        Ok(blobs.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.remove(key);
        Ok(())
    }
}
