//! In-memory blob store for tests and throwaway sessions.
//!
//! Blobs live in a `HashMap` wrapped in `Arc<RwLock<_>>`; nothing is written
//! to disk and everything is lost when the store is dropped.

mod store;

pub use store::InMemoryStore;
