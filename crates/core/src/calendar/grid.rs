use chrono::{Datelike, NaiveDate};

use super::range::DateRange;
use super::recurrence::occurs_on;
use super::types::{DayCell, Event};

/// Builds the 42 cells of the month grid showing `reference`'s month.
///
/// The grid starts on the Sunday on or before the first of the month. Each
/// cell holds the events occurring that day, in collection order; sorting and
/// capping the list is left to the renderer.
pub fn build_month_grid(reference: NaiveDate, today: NaiveDate, events: &[Event]) -> Vec<DayCell> {
    DateRange::month_grid(reference)
        .days()
        .map(|day| {
            let in_current_month =
                day.year() == reference.year() && day.month() == reference.month();
            let mut cell = DayCell::new(day, in_current_month, day == today);
            cell.events = events
                .iter()
                .filter(|event| occurs_on(event, day))
                .cloned()
                .collect();
            cell
        })
        .collect()
}

/// Days of the whole weeks covering `reference`'s month (28 to 42 days).
pub fn calendar_days(reference: NaiveDate) -> Vec<NaiveDate> {
    DateRange::month_weeks(reference).days().collect()
}

/// Sorts events by anchor start, earliest first. Stable.
pub fn sort_events_by_start(events: &mut [Event]) {
    events.sort_by_key(|event| event.start);
}
