//! Occurrence engine: decides whether an event has an occurrence on a day.
//!
//! All arithmetic works on calendar dates. The time-of-day of the anchor never
//! takes part, so the result cannot drift by a day around DST changes.

use chrono::{Datelike, NaiveDate};

use super::range::DateRange;
use super::types::{Event, RecurrenceRule};

/// Returns true if `event` has an occurrence on `day`.
///
/// Events never occur before their anchor date, nor after the rule's end date.
/// The end date itself is still eligible.
pub fn occurs_on(event: &Event, day: NaiveDate) -> bool {
    let anchor = event.anchor_date();
    if day < anchor {
        return false;
    }
    if event.recurrence.end_date().is_some_and(|last| day > last) {
        return false;
    }

    let days = (day - anchor).num_days();

    match &event.recurrence {
        RecurrenceRule::None => day == anchor,
        RecurrenceRule::Daily { interval, .. } | RecurrenceRule::Custom { interval, .. } => {
            interval.divides(days)
        }
        RecurrenceRule::Weekly {
            interval, weekdays, ..
        } => {
            if !interval.divides(days / 7) {
                return false;
            }
            if weekdays.is_empty() {
                day.weekday() == anchor.weekday()
            } else {
                weekdays.contains(&day.weekday())
            }
        }
        RecurrenceRule::Monthly { interval, .. } => {
            let months = i64::from(day.year() - anchor.year()) * 12
                + i64::from(day.month()) - i64::from(anchor.month());
            interval.divides(months) && day.day() == anchor.day()
        }
    }
}

/// Filters `events` down to those occurring on `day`, keeping their order.
pub fn events_on(day: NaiveDate, events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|e| occurs_on(e, day)).collect()
}

/// Lists every day in `range` on which `event` occurs.
pub fn occurrences_between(event: &Event, range: DateRange) -> Vec<NaiveDate> {
    range.days().filter(|day| occurs_on(event, *day)).collect()
}
