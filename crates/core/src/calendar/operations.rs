use chrono::NaiveDate;

use super::error::EventError;
use super::types::Event;

/// Maximum title length accepted by [`validate_event`].
pub const MAX_TITLE_LEN: usize = 200;

/// Validates an event before it enters the collection.
pub fn validate_event(event: &Event) -> Result<(), EventError> {
    if event.title.trim().is_empty() {
        return Err(EventError::EmptyTitle);
    }
    if event.title.chars().count() > MAX_TITLE_LEN {
        return Err(EventError::TitleTooLong);
    }
    if event.end.is_some_and(|end| end < event.start) {
        return Err(EventError::InvalidTimeRange);
    }
    if event
        .recurrence
        .end_date()
        .is_some_and(|last| last < event.anchor_date())
    {
        return Err(EventError::EndDateBeforeStart);
    }
    Ok(())
}

/// Filters events whose title or description contains `term`, ignoring case.
/// A blank term matches everything.
pub fn filter_events_by_search_term<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return events.iter().collect();
    }

    events
        .iter()
        .filter(|event| {
            event.title.to_lowercase().contains(&term)
                || event
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}

/// Moves an event to another day, keeping its time-of-day and duration.
///
/// The recurrence rule (including its end date) is left untouched.
pub fn move_event_to_date(event: &Event, date: NaiveDate) -> Event {
    let delta = date - event.anchor_date();
    Event {
        start: event.start + delta,
        end: event.end.map(|end| end + delta),
        ..event.clone()
    }
}

/// Returns the event with the given id.
pub fn find_event<'a>(events: &'a [Event], id: &str) -> Option<&'a Event> {
    events.iter().find(|event| event.id == id)
}

/// Replaces the event with the same id, or appends it when it is new.
pub fn upsert_event(events: &[Event], event: Event) -> Vec<Event> {
    let mut updated = events.to_vec();
    match updated.iter_mut().find(|e| e.id == event.id) {
        Some(slot) => *slot = event,
        None => updated.push(event),
    }
    updated
}

/// Removes the event with the given id. Returns `None` if no event had it.
pub fn remove_event(events: &[Event], id: &str) -> Option<Vec<Event>> {
    if find_event(events, id).is_none() {
        return None;
    }
    Some(events.iter().filter(|e| e.id != id).cloned().collect())
}
