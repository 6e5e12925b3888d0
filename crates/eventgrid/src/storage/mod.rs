//! Storage backend implementations.
//!
//! Concrete implementations of the `BlobStore` trait defined in
//! `eventgrid_core::storage`. The file and in-memory stores are always built;
//! the SQLite store needs the `sqlite` feature (on by default).

pub mod file;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::sync::Arc;

use eventgrid_core::storage::{BlobStore, Result};

use crate::config::{Backend, Config};

pub use file::FileStore;
pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Opens the store selected by `config.backend`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn BlobStore>> {
    tracing::debug!(backend = %config.backend, "Opening store");

    let store: Arc<dyn BlobStore> = match config.backend {
        Backend::File => {
            let store = FileStore::new(&config.data_dir);
            tracing::debug!(dir = %store.dir().display(), "Using file store");
            Arc::new(store)
        }
        Backend::Memory => Arc::new(InMemoryStore::new()),
        Backend::Sqlite => open_sqlite(&config.sqlite_path).await?,
    };
    Ok(store)
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(path: &str) -> Result<Arc<dyn BlobStore>> {
    Ok(Arc::new(SqliteStore::new(path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_path: &str) -> Result<Arc<dyn BlobStore>> {
    Err(eventgrid_core::storage::StorageError::ConnectionFailed(
        "eventgrid was built without the `sqlite` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: Backend) -> Config {
        Config {
            backend,
            data_dir: std::env::temp_dir().join(format!("eventgrid-test-{}", uuid::Uuid::new_v4())),
            sqlite_path: ":memory:".to_string(),
            storage_key: "calendar-events".to_string(),
            display_limit: 3,
        }
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&config(Backend::Memory)).await.unwrap();
        store.write("k", "v").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_open_file_store_is_lazy() {
        let config = config(Backend::File);
        let store = open_store(&config).await.unwrap();

        assert_eq!(store.read("k").await.unwrap(), None);
        assert!(!config.data_dir.exists());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_open_sqlite_store() {
        let store = open_store(&config(Backend::Sqlite)).await.unwrap();
        store.write("k", "v").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), Some("v".to_string()));
    }
}
