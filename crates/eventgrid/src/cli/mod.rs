//! CLI command definitions.

pub mod event;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Backend, Config};

/// Month-grid calendar with recurring events and conflict detection.
#[derive(Debug, Parser)]
#[command(name = "eventgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Storage backend [default: file, or EVENTGRID_BACKEND].
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// Directory for the file backend.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// SQLite database path.
    #[arg(long, global = true)]
    pub sqlite_path: Option<String>,

    /// Key the event collection is stored under.
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Events shown per day before "+N more".
    #[arg(long, global = true)]
    pub display_limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line flags applied on top.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(path) = &self.sqlite_path {
            config.sqlite_path = path.clone();
        }
        if let Some(key) = &self.key {
            config.storage_key = key.clone();
        }
        if let Some(limit) = self.display_limit {
            config.display_limit = limit;
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the month grid.
    Month {
        /// Any day of the month to show [default: today].
        date: Option<NaiveDate>,
        /// Months to move forward (negative moves back).
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// List events.
    List {
        /// Only events whose title or description contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Only events occurring on this day (YYYY-MM-DD).
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Add an event.
    Add(event::AddArgs),
    /// Edit an event.
    Edit(event::EditArgs),
    /// Delete an event.
    Delete {
        /// Event ID.
        id: String,
    },
    /// Move an event to another day, keeping its time.
    Move {
        /// Event ID.
        id: String,
        /// New date (YYYY-MM-DD).
        date: NaiveDate,
        /// Save even if the event conflicts with others.
        #[arg(long)]
        force: bool,
    },
    /// Check whether an event occurs on a day, or list its days this month.
    Occurs {
        /// Event ID.
        id: String,
        /// Day to check (YYYY-MM-DD). Without it, lists the days in the
        /// month grid around today.
        date: Option<NaiveDate>,
    },
    /// List the events a proposed time slot would conflict with.
    Conflicts {
        /// Day of the slot (YYYY-MM-DD).
        date: NaiveDate,
        /// Start time (HH:MM).
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// End time (HH:MM). Without it the slot blocks the whole day.
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveTime>,
        /// Also check recurring events' occurrences on that day, not only
        /// their first date.
        #[arg(long)]
        expand: bool,
    },
}

/// Parses HH:MM or HH:MM:SS.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30"), Ok(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert_eq!(
            parse_time("23:59:59"),
            Ok(NaiveTime::from_hms_opt(23, 59, 59).unwrap())
        );
        assert!(parse_time("9am").is_err());
    }

    #[test]
    fn test_parse_month_with_offset() {
        let cli = Cli::try_parse_from(["eventgrid", "month", "2024-03-15", "--offset", "-2"]).unwrap();
        match cli.command {
            Commands::Month { date, offset } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15));
                assert_eq!(offset, -2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "eventgrid",
            "list",
            "--format",
            "json",
            "--backend",
            "memory",
            "--display-limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let config = cli.config();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.display_limit, 5);
    }

    #[test]
    fn test_parse_conflicts() {
        let cli = Cli::try_parse_from([
            "eventgrid",
            "conflicts",
            "2024-03-11",
            "--start",
            "09:00",
            "--end",
            "10:00",
            "--expand",
        ])
        .unwrap();

        match cli.command {
            Commands::Conflicts {
                start, end, expand, ..
            } => {
                assert_eq!(start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
                assert_eq!(end, NaiveTime::from_hms_opt(10, 0, 0));
                assert!(expand);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
