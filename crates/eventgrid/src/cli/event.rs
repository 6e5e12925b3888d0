//! Arguments for adding and editing events.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, ValueEnum};

use eventgrid_core::calendar::{
    CreateEventRequest, EventColor, RecurrenceKind, UpdateEventRequest,
};

use super::parse_time;

/// CLI recurrence type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Repeat {
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl From<Repeat> for RecurrenceKind {
    fn from(r: Repeat) -> Self {
        match r {
            Repeat::None => RecurrenceKind::None,
            Repeat::Daily => RecurrenceKind::Daily,
            Repeat::Weekly => RecurrenceKind::Weekly,
            Repeat::Monthly => RecurrenceKind::Monthly,
            Repeat::Custom => RecurrenceKind::Custom,
        }
    }
}

/// CLI color (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Color {
    Blue,
    Green,
    Purple,
    Amber,
    Red,
    Pink,
}

impl From<Color> for EventColor {
    fn from(c: Color) -> Self {
        match c {
            Color::Blue => EventColor::Blue,
            Color::Green => EventColor::Green,
            Color::Purple => EventColor::Purple,
            Color::Amber => EventColor::Amber,
            Color::Red => EventColor::Red,
            Color::Pink => EventColor::Pink,
        }
    }
}

/// Add a new event.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Event title.
    #[arg(long)]
    pub title: String,
    /// Event date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// Start time (HH:MM).
    #[arg(long, value_parser = parse_time)]
    pub start: NaiveTime,
    /// End time (HH:MM). Without it the event blocks its whole day.
    #[arg(long, value_parser = parse_time)]
    pub end: Option<NaiveTime>,
    /// Optional description.
    #[arg(long)]
    pub description: Option<String>,
    /// Accent color.
    #[arg(long, value_enum)]
    pub color: Option<Color>,
    /// How the event repeats.
    #[arg(long, value_enum, default_value = "none")]
    pub repeat: Repeat,
    /// Repeat every N days, weeks or months.
    #[arg(long)]
    pub interval: Option<u32>,
    /// Weekdays of a weekly event, 0 = Sunday through 6 = Saturday.
    #[arg(long, value_delimiter = ',')]
    pub weekdays: Vec<u8>,
    /// Last day the event may repeat on (YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<NaiveDate>,
    /// Save even if the event conflicts with others.
    #[arg(long)]
    pub force: bool,
}

impl From<AddArgs> for CreateEventRequest {
    fn from(args: AddArgs) -> Self {
        CreateEventRequest {
            title: args.title,
            date: args.date,
            start_time: args.start,
            end_time: args.end,
            description: args.description,
            color: args.color.map(Into::into),
            recurrence: args.repeat.into(),
            interval: args.interval,
            weekdays: args.weekdays,
            end_date: args.until,
        }
    }
}

/// Edit an existing event. Omitted options keep their value.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Event ID.
    pub id: String,
    /// New title.
    #[arg(long)]
    pub title: Option<String>,
    /// New date.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// New start time.
    #[arg(long, value_parser = parse_time)]
    pub start: Option<NaiveTime>,
    /// New end time.
    #[arg(long, value_parser = parse_time, conflicts_with = "all_day")]
    pub end: Option<NaiveTime>,
    /// Drop the end time so the event blocks its whole day.
    #[arg(long)]
    pub all_day: bool,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// New color.
    #[arg(long, value_enum)]
    pub color: Option<Color>,
    /// New recurrence type.
    #[arg(long, value_enum)]
    pub repeat: Option<Repeat>,
    /// New interval.
    #[arg(long)]
    pub interval: Option<u32>,
    /// New weekdays, 0 = Sunday through 6 = Saturday.
    #[arg(long, value_delimiter = ',')]
    pub weekdays: Option<Vec<u8>>,
    /// New last day of the recurrence.
    #[arg(long, conflicts_with = "forever")]
    pub until: Option<NaiveDate>,
    /// Remove the recurrence end date.
    #[arg(long)]
    pub forever: bool,
    /// Save even if the event conflicts with others.
    #[arg(long)]
    pub force: bool,
}

impl EditArgs {
    /// Splits into the event id, the update request and the force flag.
    pub fn into_parts(self) -> (String, UpdateEventRequest, bool) {
        let request = UpdateEventRequest {
            title: self.title,
            date: self.date,
            start_time: self.start,
            end_time: self.end,
            clear_end_time: self.all_day,
            description: self.description,
            color: self.color.map(Into::into),
            recurrence: self.repeat.map(Into::into),
            interval: self.interval,
            weekdays: self.weekdays,
            end_date: self.until,
            clear_end_date: self.forever,
        };
        (self.id, request, self.force)
    }
}
