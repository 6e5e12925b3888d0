//! Runs a parsed command against the event book and renders the result.

use anyhow::{anyhow, Result};
use chrono::{Days, Months, NaiveDate};

use eventgrid_core::calendar::{first_of_month, DateRange, Event, GRID_DAYS};

use crate::book::EventBook;
use crate::cli::{Commands, OutputFormat};
use crate::output::{format_output, pretty};

/// Settings that shape command output.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub quiet: bool,
    pub display_limit: usize,
    pub today: NaiveDate,
}

/// Executes `command` and returns the text to print (possibly empty).
pub async fn execute(command: Commands, book: &EventBook, opts: RunOptions) -> Result<String> {
    let output = match command {
        Commands::Month { date, offset } => {
            let start = date.unwrap_or(opts.today);
            let reference = shift_months(start, offset)
                .ok_or_else(|| anyhow!("Month offset {offset} from {start} is out of range"))?;
            let cells = book.month(reference, opts.today).await;
            match opts.format {
                OutputFormat::Json => format_output(&cells, opts.format),
                OutputFormat::Pretty => {
                    pretty::format_month(reference, &cells, opts.display_limit)
                }
            }
        }
        Commands::List { search, on } => {
            let mut events = match &search {
                Some(term) => book.search(term).await,
                None => book.events().await,
            };
            if let Some(day) = on {
                let occurring: Vec<String> =
                    book.on_day(day).await.into_iter().map(|e| e.id).collect();
                events.retain(|e| occurring.contains(&e.id));
            }
            render_events(&events, opts.format)
        }
        Commands::Add(args) => {
            let force = args.force;
            let event = book.create(args.into(), force).await?;
            render_event("Created", &event, opts)
        }
        Commands::Edit(args) => {
            let (id, request, force) = args.into_parts();
            let event = book.update(&id, request, force).await?;
            render_event("Updated", &event, opts)
        }
        Commands::Delete { id } => {
            let event = book.delete(&id).await?;
            match opts.format {
                OutputFormat::Json => format_output(&event, opts.format),
                OutputFormat::Pretty if opts.quiet => String::new(),
                OutputFormat::Pretty => format!("Deleted event {} ({})", event.title, event.id),
            }
        }
        Commands::Move { id, date, force } => {
            let event = book.move_to(&id, date, force).await?;
            render_event("Moved", &event, opts)
        }
        Commands::Occurs { id, date: Some(day) } => {
            let occurs = book.occurs(&id, day).await?;
            match opts.format {
                OutputFormat::Json => format_output(&occurs, opts.format),
                OutputFormat::Pretty => {
                    let verb = if occurs { "occurs" } else { "does not occur" };
                    format!("{id} {verb} on {day}")
                }
            }
        }
        Commands::Occurs { id, date: None } => {
            let days = book
                .occurrences(&id, DateRange::month_grid(opts.today))
                .await?;
            match opts.format {
                OutputFormat::Json => format_output(&days, opts.format),
                OutputFormat::Pretty if days.is_empty() => {
                    format!("{id} has no occurrences around {}", opts.today.format("%B %Y"))
                }
                OutputFormat::Pretty => days
                    .iter()
                    .map(|d| d.format("%a %Y-%m-%d").to_string())
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
        }
        Commands::Conflicts {
            date,
            start,
            end,
            expand,
        } => {
            let mut candidate = Event::new("Proposed slot", date.and_time(start));
            if let Some(end) = end {
                candidate = candidate.with_end(date.and_time(end));
            }
            let conflicts = book.conflicts_with(&candidate, expand).await;
            match opts.format {
                OutputFormat::Json => format_output(&conflicts, opts.format),
                OutputFormat::Pretty => pretty::format_conflicts(&candidate, &conflicts),
            }
        }
    };
    Ok(output)
}

/// Shifts by whole months, clamping the day to the target month's length.
/// Returns `None` when the target month's grid is not representable.
fn shift_months(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        date.checked_add_months(months)?
    } else {
        date.checked_sub_months(months)?
    };
    // The grid reaches up to six days before the 1st and 41 days after it.
    let first = first_of_month(shifted);
    first.checked_sub_days(Days::new(6))?;
    first.checked_add_days(Days::new(GRID_DAYS as u64))?;
    Some(shifted)
}

fn render_events(events: &[Event], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_output(&events, format),
        OutputFormat::Pretty => pretty::format_events(events),
    }
}

fn render_event(verb: &str, event: &Event, opts: RunOptions) -> String {
    match opts.format {
        OutputFormat::Json => format_output(event, opts.format),
        OutputFormat::Pretty if opts.quiet => event.id.clone(),
        OutputFormat::Pretty => format!("{verb}:\n{}", pretty::format_event(event)),
    }
}
