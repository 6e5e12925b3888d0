//! Pretty output formatting.

use chrono::{Datelike, NaiveDate};

use eventgrid_core::calendar::{DayCell, Event};

const WEEKDAY_HEADER: &str = " Sun  Mon  Tue  Wed  Thu  Fri  Sat";

/// Format the time span of an event's anchor occurrence.
pub fn format_time_span(event: &Event) -> String {
    match event.end {
        Some(end) => format!(
            "{}-{}",
            event.start.format("%H:%M"),
            end.format("%H:%M")
        ),
        None => "all day".to_string(),
    }
}

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  When: {} {}",
        event.title,
        event.color,
        event.id,
        event.anchor_date(),
        format_time_span(event)
    );
    if event.recurrence.is_recurring() {
        output.push_str(&format!("\n  Repeats: {}", event.recurrence.describe()));
        if let Some(last) = event.recurrence.end_date() {
            output.push_str(&format!(" until {last}"));
        }
    }
    if let Some(desc) = &event.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format the events a candidate would conflict with.
pub fn format_conflicts(candidate: &Event, conflicts: &[Event]) -> String {
    if conflicts.is_empty() {
        return format!("No conflicts for \"{}\".", candidate.title);
    }
    let mut output = format!("CONFLICTS ({})\n", conflicts.len());
    output.push_str(&"-".repeat(40));
    for event in conflicts {
        output.push_str(&format!(
            "\n{}  {} ({})",
            format_time_span(event),
            event.title,
            event.id
        ));
    }
    output
}

/// Day number as shown in the grid: today in brackets, days with events
/// marked with `*`, days outside the month dimmed with a leading `.`.
fn format_day_number(cell: &DayCell) -> String {
    let day = cell.date.day();
    let marker = if cell.is_empty() { ' ' } else { '*' };
    if cell.is_today {
        format!("[{day:>2}]{marker}")
    } else if !cell.in_current_month {
        format!(" .{day:>2}{marker}")
    } else {
        format!("  {day:>2}{marker}")
    }
}

/// Format a single day cell's agenda, showing at most `limit` events.
pub fn format_day(cell: &DayCell, limit: usize) -> String {
    let mut output = cell.date.format("%a %b %d").to_string();
    if cell.is_today {
        output.push_str(" (today)");
    }
    let (visible, hidden) = cell.visible(limit);
    for event in visible {
        output.push_str(&format!("\n  {:<11}  {}", format_time_span(event), event.title));
    }
    if hidden > 0 {
        output.push_str(&format!("\n  +{hidden} more"));
    }
    output
}

/// Format the month grid followed by the agenda of its busy days.
pub fn format_month(reference: NaiveDate, cells: &[DayCell], limit: usize) -> String {
    let mut output = reference.format("%B %Y").to_string();
    output.push('\n');
    output.push_str(WEEKDAY_HEADER);

    for week in cells.chunks(7) {
        output.push('\n');
        let row: Vec<String> = week.iter().map(format_day_number).collect();
        output.push_str(row.join("").trim_end());
    }

    let busy: Vec<&DayCell> = cells
        .iter()
        .filter(|c| c.in_current_month && !c.is_empty())
        .collect();
    if !busy.is_empty() {
        output.push('\n');
        output.push_str(&"-".repeat(40));
        for cell in busy {
            output.push('\n');
            output.push_str(&format_day(cell, limit));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};
    use eventgrid_core::calendar::{build_month_grid, EventColor, Interval, RecurrenceRule};

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, min: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(hour, min, 0).unwrap())
    }

    #[test]
    fn test_format_time_span() {
        let day = make_date(2024, 3, 4);
        let timed = Event::new("Call", at(day, 9, 0)).with_end(at(day, 9, 30));
        let open = Event::new("Holiday", at(day, 0, 0));

        assert_eq!(format_time_span(&timed), "09:00-09:30");
        assert_eq!(format_time_span(&open), "all day");
    }

    #[test]
    fn test_format_event_with_recurrence() {
        let day = make_date(2024, 3, 4);
        let event = Event::new("Standup", at(day, 9, 0))
            .with_id("abc")
            .with_end(at(day, 9, 15))
            .with_color(EventColor::Green)
            .with_recurrence(RecurrenceRule::daily(Interval::ONE).until(make_date(2024, 3, 29)));

        assert_eq!(
            format_event(&event),
            "Standup [green]\n  ID: abc\n  When: 2024-03-04 09:00-09:15\n  Repeats: Daily until 2024-03-29"
        );
    }

    #[test]
    fn test_format_events_empty() {
        assert_eq!(format_events(&[]), "No events found.");
    }

    #[test]
    fn test_format_day_caps_events() {
        let day = make_date(2024, 3, 4);
        let mut cell = DayCell::new(day, true, false);
        cell.events = (0..5)
            .map(|i| Event::new(format!("Meeting {i}"), at(day, 17 - i, 0)))
            .collect();

        let text = format_day(&cell, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Mon Mar 04");
        assert_eq!(lines.len(), 5);
        // Earliest first
        assert!(lines[1].ends_with("Meeting 4"));
        assert_eq!(lines[4], "  +2 more");
    }

    #[test]
    fn test_format_month_layout() {
        let reference = make_date(2024, 3, 1);
        let events = vec![Event::new("Dentist", at(make_date(2024, 3, 12), 15, 0))];
        let cells = build_month_grid(reference, make_date(2024, 3, 4), &events);

        let text = format_month(reference, &cells, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines[1], WEEKDAY_HEADER);
        assert_eq!(lines[2], " .25  .26  .27  .28  .29    1    2");
        assert_eq!(lines[3], "   3 [ 4]    5    6    7    8    9");
        assert_eq!(lines[4], "  10   11   12*  13   14   15   16");
        assert!(text.contains("Tue Mar 12\n  all day      Dentist"));
    }
}
