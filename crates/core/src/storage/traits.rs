use async_trait::async_trait;

use super::Result;

/// A key-value store holding one text blob per key.
///
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, or `None` if there is none.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the blob under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
