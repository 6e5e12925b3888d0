//! JSON encoding of the event collection.
//!
//! Timestamps are written as `YYYY-MM-DDTHH:MM:SS` and dates as `YYYY-MM-DD`,
//! so the stored text sorts the same way the values do.

use crate::calendar::Event;

use super::{Result, StorageError};

/// Serializes the collection to a JSON array.
pub fn encode_events(events: &[Event]) -> Result<String> {
    serde_json::to_string(events).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parses a JSON array produced by [`encode_events`].
pub fn decode_events(text: &str) -> Result<Vec<Event>> {
    serde_json::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
}
