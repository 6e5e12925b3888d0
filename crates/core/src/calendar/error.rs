use thiserror::Error;

/// Errors that can occur when validating or building an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event title too long (max 200 characters)")]
    TitleTooLong,
    #[error("End time must not be before start time")]
    InvalidTimeRange,
    #[error("Recurrence interval must be at least 1, got {0}")]
    InvalidInterval(u32),
    #[error("Invalid weekday {0} (expected 0 = Sunday through 6 = Saturday)")]
    InvalidWeekday(u8),
    #[error("Recurrence end date must not be before the event date")]
    EndDateBeforeStart,
}

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start date must be before or equal to end date")]
    InvalidRange,
}
