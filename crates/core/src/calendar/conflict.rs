//! Conflict detection between events on the same calendar day.
//!
//! An event without an end time blocks its whole day. Timed events conflict
//! when their closed intervals intersect, so back-to-back meetings that touch
//! at the boundary count as a conflict.

use super::operations::move_event_to_date;
use super::recurrence::occurs_on;
use super::types::Event;

/// Returns true if two events overlap on their anchor day.
pub fn events_conflict(a: &Event, b: &Event) -> bool {
    if a.anchor_date() != b.anchor_date() {
        return false;
    }

    match (a.end, b.end) {
        (Some(a_end), Some(b_end)) => a.start <= b_end && b.start <= a_end,
        _ => true,
    }
}

/// Finds the events in `existing` that overlap `candidate`.
///
/// Only anchor occurrences are compared: a recurring event conflicts only
/// through its first occurrence. The candidate itself (same id) is skipped,
/// and the result keeps the order of `existing`.
pub fn find_conflicts<'a>(candidate: &Event, existing: &'a [Event]) -> Vec<&'a Event> {
    existing
        .iter()
        .filter(|event| event.id != candidate.id && events_conflict(candidate, event))
        .collect()
}

/// Like [`find_conflicts`], but each existing event is first projected onto the
/// candidate's anchor day.
///
/// A recurring event that occurs on that day takes part with its own
/// time-of-day and duration. Events with no occurrence that day are skipped.
pub fn find_projected_conflicts<'a>(candidate: &Event, existing: &'a [Event]) -> Vec<&'a Event> {
    let day = candidate.anchor_date();

    existing
        .iter()
        .filter(|event| event.id != candidate.id && occurs_on(event, day))
        .filter(|event| events_conflict(candidate, &move_event_to_date(event, day)))
        .collect()
}
