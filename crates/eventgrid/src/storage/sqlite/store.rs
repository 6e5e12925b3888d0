//! SQLite store implementation.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use eventgrid_core::storage::{BlobStore, Result, StorageError};

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based blob store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a file-based database, creating it and its schema if needed.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens an in-memory database. Data is lost when the store is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl BlobStore for SqliteStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_VALUE, [&key], |row| row.get::<_, String>(0))
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_VALUE, [&key, &value])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_VALUE, [&key]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}
