//! Loading and saving the event collection through a [`BlobStore`].

use crate::calendar::Event;

use super::codec::{decode_events, encode_events};
use super::{BlobStore, Result};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "calendar-events";

/// Loads the collection stored under `key`.
///
/// Never fails: a missing blob, a blob that does not parse, or a store that
/// cannot be read all yield an empty collection.
pub async fn load_events(store: &dyn BlobStore, key: &str) -> Vec<Event> {
    let text = match store.read(key).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::debug!(key, "No stored events");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored events");
            return Vec::new();
        }
    };

    match decode_events(&text) {
        Ok(events) => {
            tracing::debug!(key, count = events.len(), "Loaded events");
            events
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored events");
            Vec::new()
        }
    }
}

/// Replaces the collection stored under `key`.
pub async fn save_events(store: &dyn BlobStore, key: &str, events: &[Event]) -> Result<()> {
    let text = encode_events(events)?;
    store.write(key, &text).await?;
    tracing::debug!(key, count = events.len(), "Saved events");
    Ok(())
}
