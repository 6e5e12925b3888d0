use thiserror::Error;

use eventgrid_core::calendar::{Event, EventError};
use eventgrid_core::storage::StorageError;

/// Errors returned by [`crate::book::EventBook`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Event not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] EventError),
    #[error("Conflicts with {}", titles(.0))]
    Conflicts(Vec<Event>),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn titles(events: &[Event]) -> String {
    events
        .iter()
        .map(|e| format!("\"{}\"", e.title))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for event book operations.
pub type Result<T> = std::result::Result<T, BookError>;
