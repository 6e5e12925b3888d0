mod conflict;
mod error;
mod grid;
mod operations;
mod range;
mod recurrence;
mod requests;
mod types;

pub use conflict::{events_conflict, find_conflicts, find_projected_conflicts};
pub use error::{DateRangeError, EventError};
pub use grid::{build_month_grid, calendar_days, sort_events_by_start};
pub use operations::{
    filter_events_by_search_term, find_event, move_event_to_date, remove_event, upsert_event,
    validate_event, MAX_TITLE_LEN,
};
pub use range::{
    first_of_month, last_of_month, next_month, prev_month, start_of_week, DateRange, GRID_DAYS,
};
pub use recurrence::{events_on, occurrences_between, occurs_on};
pub use requests::{
    build_recurrence, weekday_from_index, weekday_index, CreateEventRequest, UpdateEventRequest,
};
pub use types::{DayCell, Event, EventColor, Interval, RecurrenceKind, RecurrenceRule};
