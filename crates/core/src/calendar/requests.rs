//! Form payloads for creating and editing events.
//!
//! These carry raw field values the way a form submits them (weekdays as
//! Sunday-based numbers, empty strings for blank fields). Converting them into
//! an [`Event`] is where invalid input gets rejected.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::error::EventError;
use super::operations::validate_event;
use super::types::{Event, EventColor, Interval, RecurrenceKind, RecurrenceRule};
use crate::serde::{
    deserialize_optional_date, deserialize_optional_string, deserialize_optional_time,
    deserialize_time,
};

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Maps a Sunday-based index (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_index(index: u8) -> Result<Weekday, EventError> {
    SUNDAY_FIRST
        .get(usize::from(index))
        .copied()
        .ok_or(EventError::InvalidWeekday(index))
}

/// Sunday-based index of a weekday (0 = Sunday).
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    weekday.num_days_from_sunday() as u8
}

/// Builds a recurrence rule from raw form fields.
///
/// `interval`, `weekdays` and `end_date` are ignored for one-time events;
/// `weekdays` only applies to weekly rules.
pub fn build_recurrence(
    kind: RecurrenceKind,
    interval: u32,
    weekdays: &[u8],
    end_date: Option<NaiveDate>,
) -> Result<RecurrenceRule, EventError> {
    if kind == RecurrenceKind::None {
        return Ok(RecurrenceRule::None);
    }

    let interval = Interval::new(interval).ok_or(EventError::InvalidInterval(interval))?;
    let rule = match kind {
        RecurrenceKind::None => RecurrenceRule::None,
        RecurrenceKind::Daily => RecurrenceRule::daily(interval),
        RecurrenceKind::Weekly => {
            let days = weekdays
                .iter()
                .map(|index| weekday_from_index(*index))
                .collect::<Result<Vec<_>, _>>()?;
            RecurrenceRule::weekly(interval, days)
        }
        RecurrenceKind::Monthly => RecurrenceRule::monthly(interval),
        RecurrenceKind::Custom => RecurrenceRule::custom(interval),
    };

    Ok(match end_date {
        Some(last) => rule.until(last),
        None => rule,
    })
}

/// Request payload for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(default)]
    pub recurrence: RecurrenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Sunday-based weekday numbers, weekly rules only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

impl CreateEventRequest {
    /// Create a one-time event request with no end time.
    pub fn new(title: impl Into<String>, date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time: None,
            description: None,
            color: None,
            recurrence: RecurrenceKind::None,
            interval: None,
            weekdays: Vec::new(),
            end_date: None,
        }
    }

    /// Set the end time (same day as the start).
    pub fn with_end_time(mut self, end_time: NaiveTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set how the event repeats.
    pub fn with_recurrence(mut self, kind: RecurrenceKind, interval: u32) -> Self {
        self.recurrence = kind;
        self.interval = Some(interval);
        self
    }

    /// Set the weekdays (0 = Sunday) of a weekly rule.
    pub fn with_weekdays(mut self, weekdays: impl Into<Vec<u8>>) -> Self {
        self.weekdays = weekdays.into();
        self
    }

    /// Set the last day the event may repeat on.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Convert into a validated Event with a fresh id.
    pub fn into_event(self) -> Result<Event, EventError> {
        let recurrence = build_recurrence(
            self.recurrence,
            self.interval.unwrap_or(1),
            &self.weekdays,
            self.end_date,
        )?;

        let mut event = Event::new(self.title.trim(), self.date.and_time(self.start_time))
            .with_color(self.color.unwrap_or_default())
            .with_recurrence(recurrence);
        if let Some(end_time) = self.end_time {
            event = event.with_end(self.date.and_time(end_time));
        }
        if let Some(description) = self.description {
            event = event.with_description(description);
        }

        validate_event(&event)?;
        Ok(event)
    }
}

/// Request payload for editing an event. Missing fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    /// Drop the end time, turning the event into an all-day block.
    #[serde(default)]
    pub clear_end_time: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<u8>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    /// Let the event repeat forever.
    #[serde(default)]
    pub clear_end_date: bool,
}

impl UpdateEventRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_end_time(mut self, end_time: NaiveTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_recurrence(mut self, kind: RecurrenceKind) -> Self {
        self.recurrence = Some(kind);
        self
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn touches_recurrence(&self) -> bool {
        self.recurrence.is_some()
            || self.interval.is_some()
            || self.weekdays.is_some()
            || self.end_date.is_some()
            || self.clear_end_date
    }

    /// Produce the edited event. The id never changes.
    pub fn apply_to(self, event: &Event) -> Result<Event, EventError> {
        let date = self.date.unwrap_or(event.anchor_date());
        let start_time = self.start_time.unwrap_or(event.start.time());

        let end = if self.clear_end_time {
            None
        } else {
            self.end_time
                .or(event.end.map(|end| end.time()))
                .map(|time| date.and_time(time))
        };

        let recurrence = if self.touches_recurrence() {
            let current = &event.recurrence;
            let weekdays = match &self.weekdays {
                Some(days) => days.clone(),
                None => current.weekdays().iter().map(|d| weekday_index(*d)).collect(),
            };
            let end_date = if self.clear_end_date {
                None
            } else {
                self.end_date.or(current.end_date())
            };
            build_recurrence(
                self.recurrence.unwrap_or(current.kind()),
                self.interval
                    .unwrap_or(current.interval().map_or(1, Interval::get)),
                &weekdays,
                end_date,
            )?
        } else {
            event.recurrence.clone()
        };

        let edited = Event {
            id: event.id.clone(),
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| event.title.clone()),
            start: date.and_time(start_time),
            end,
            description: self.description.or_else(|| event.description.clone()),
            color: self.color.unwrap_or(event.color),
            recurrence,
        };

        validate_event(&edited)?;
        Ok(edited)
    }
}
