use std::fmt;
use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accent color of an event tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Purple,
    Amber,
    Red,
    Pink,
}

impl EventColor {
    /// All colors, in picker order.
    pub const ALL: [EventColor; 6] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Purple,
        EventColor::Amber,
        EventColor::Red,
        EventColor::Pink,
    ];

    /// Returns the lowercase name of this color.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Purple => "purple",
            EventColor::Amber => "amber",
            EventColor::Red => "red",
            EventColor::Pink => "pink",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spacing between recurrences, in the unit of the rule. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(NonZeroU32);

impl Interval {
    pub const ONE: Interval = Interval(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// True when `steps` is a whole multiple of this interval.
    pub fn divides(self, steps: i64) -> bool {
        steps.rem_euclid(i64::from(self.get())) == 0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Discriminant of a [`RecurrenceRule`], used by forms and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

/// How an event repeats.
///
/// `end_date` is the last day an occurrence may fall on (inclusive).
/// `Custom` repeats every `interval` days, same as `Daily`; the two are only
/// told apart for labeling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily {
        #[serde(default)]
        interval: Interval,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    Weekly {
        #[serde(default)]
        interval: Interval,
        /// Days of the week to repeat on. Empty means the anchor's weekday.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        weekdays: Vec<Weekday>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    Monthly {
        #[serde(default)]
        interval: Interval,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    Custom {
        #[serde(default)]
        interval: Interval,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
}

impl RecurrenceRule {
    /// Repeats every `interval` days.
    pub fn daily(interval: Interval) -> Self {
        RecurrenceRule::Daily {
            interval,
            end_date: None,
        }
    }

    /// Repeats every `interval` weeks on the given weekdays (duplicates dropped).
    pub fn weekly(interval: Interval, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = Vec::new();
        for day in weekdays {
            if !days.contains(&day) {
                days.push(day);
            }
        }
        days.sort_by_key(|d| d.num_days_from_sunday());
        RecurrenceRule::Weekly {
            interval,
            weekdays: days,
            end_date: None,
        }
    }

    /// Repeats every `interval` months on the anchor's day of month.
    pub fn monthly(interval: Interval) -> Self {
        RecurrenceRule::Monthly {
            interval,
            end_date: None,
        }
    }

    /// Repeats every `interval` days.
    pub fn custom(interval: Interval) -> Self {
        RecurrenceRule::Custom {
            interval,
            end_date: None,
        }
    }

    /// Sets the last day an occurrence may fall on. No effect on `None`.
    pub fn until(mut self, last_day: NaiveDate) -> Self {
        match &mut self {
            RecurrenceRule::None => {}
            RecurrenceRule::Daily { end_date, .. }
            | RecurrenceRule::Weekly { end_date, .. }
            | RecurrenceRule::Monthly { end_date, .. }
            | RecurrenceRule::Custom { end_date, .. } => *end_date = Some(last_day),
        }
        self
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            RecurrenceRule::None => RecurrenceKind::None,
            RecurrenceRule::Daily { .. } => RecurrenceKind::Daily,
            RecurrenceRule::Weekly { .. } => RecurrenceKind::Weekly,
            RecurrenceRule::Monthly { .. } => RecurrenceKind::Monthly,
            RecurrenceRule::Custom { .. } => RecurrenceKind::Custom,
        }
    }

    /// Returns true for every rule other than `None`.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceRule::None)
    }

    /// Returns the interval, or `None` for one-time events.
    pub fn interval(&self) -> Option<Interval> {
        match self {
            RecurrenceRule::None => None,
            RecurrenceRule::Daily { interval, .. }
            | RecurrenceRule::Weekly { interval, .. }
            | RecurrenceRule::Monthly { interval, .. }
            | RecurrenceRule::Custom { interval, .. } => Some(*interval),
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            RecurrenceRule::None => None,
            RecurrenceRule::Daily { end_date, .. }
            | RecurrenceRule::Weekly { end_date, .. }
            | RecurrenceRule::Monthly { end_date, .. }
            | RecurrenceRule::Custom { end_date, .. } => *end_date,
        }
    }

    /// Weekdays of a weekly rule; empty for every other rule.
    pub fn weekdays(&self) -> &[Weekday] {
        match self {
            RecurrenceRule::Weekly { weekdays, .. } => weekdays,
            _ => &[],
        }
    }

    /// Human-readable summary, e.g. "Every 2 weeks on Mon, Wed".
    pub fn describe(&self) -> String {
        match self {
            RecurrenceRule::None => "One-time event".to_string(),
            RecurrenceRule::Daily { interval, .. } => match interval.get() {
                1 => "Daily".to_string(),
                n => format!("Every {n} days"),
            },
            RecurrenceRule::Weekly {
                interval, weekdays, ..
            } => {
                let base = match interval.get() {
                    1 => "Weekly".to_string(),
                    n => format!("Every {n} weeks"),
                };
                if weekdays.is_empty() {
                    base
                } else {
                    let days: Vec<String> = weekdays.iter().map(|d| d.to_string()).collect();
                    format!("{base} on {}", days.join(", "))
                }
            }
            RecurrenceRule::Monthly { interval, .. } => match interval.get() {
                1 => "Monthly".to_string(),
                n => format!("Every {n} months"),
            },
            RecurrenceRule::Custom { interval, .. } => format!("Every {interval} days"),
        }
    }
}

/// A calendar event. `start` is the anchor: the first occurrence, and for
/// recurring events the source of the weekday / day-of-month pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    /// End of the anchor occurrence. Events without one block their whole day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub color: EventColor,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

impl Event {
    /// Creates a one-time event with a freshly generated id.
    pub fn new(title: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start,
            end: None,
            description: None,
            color: EventColor::default(),
            recurrence: RecurrenceRule::None,
        }
    }

    /// Sets the end of the anchor occurrence.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_recurrence(mut self, recurrence: RecurrenceRule) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Calendar date of the anchor occurrence.
    pub fn anchor_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns true if this event has no end time and blocks its whole day.
    pub fn is_all_day(&self) -> bool {
        self.end.is_none()
    }

    /// Returns true if the anchor falls on `day`, ignoring time-of-day.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.anchor_date() == day
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    /// Events occurring on this day, in collection order.
    pub events: Vec<Event>,
}

impl DayCell {
    pub fn new(date: NaiveDate, in_current_month: bool, is_today: bool) -> Self {
        Self {
            date,
            in_current_month,
            is_today,
            events: Vec::new(),
        }
    }

    /// Returns true if no event occurs on this day.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Events ordered by time-of-day of their anchor. Ties keep collection order.
    pub fn sorted_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|e| e.start.time());
        events
    }

    /// The first `limit` events by start time, plus how many were left out.
    pub fn visible(&self, limit: usize) -> (Vec<&Event>, usize) {
        let mut events = self.sorted_events();
        let hidden = events.len().saturating_sub(limit);
        events.truncate(limit);
        (events, hidden)
    }

    /// Sunday-based column of this cell (0 = Sunday).
    pub fn column(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }
}
