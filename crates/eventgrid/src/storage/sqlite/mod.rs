//! SQLite blob store.
//!
//! Blobs live in a single `kv` table. Uses `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping.

mod error;
mod schema;
mod store;

pub use store::SqliteStore;
