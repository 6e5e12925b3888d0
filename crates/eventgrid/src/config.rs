use std::{env, fmt, path::PathBuf};

use clap::ValueEnum;
use eventgrid_core::storage::DEFAULT_STORAGE_KEY;

/// Where the event collection is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One JSON file per storage key under the data directory.
    #[default]
    File,
    /// A single SQLite database.
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::File => "file",
            Backend::Sqlite => "sqlite",
            Backend::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (default: file)
    pub backend: Backend,
    /// Directory for the file backend (default: ".eventgrid")
    pub data_dir: PathBuf,
    /// Path to SQLite database file (default: "eventgrid.db")
    pub sqlite_path: String,
    /// Key the collection is stored under (default: "calendar-events")
    pub storage_key: String,
    /// Events shown per day cell before "+N more" (default: 3)
    pub display_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EVENTGRID_BACKEND` - `file`, `sqlite` or `memory` (default: file)
    /// - `EVENTGRID_DATA_DIR` - File backend directory (default: ".eventgrid")
    /// - `EVENTGRID_SQLITE_PATH` - SQLite database path (default: "eventgrid.db")
    /// - `EVENTGRID_STORAGE_KEY` - Storage key (default: "calendar-events")
    /// - `EVENTGRID_DISPLAY_LIMIT` - Events per day cell (default: 3)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            backend: env::var("EVENTGRID_BACKEND")
                .ok()
                .and_then(|v| Backend::from_str(v.trim(), true).ok())
                .unwrap_or_default(),
            data_dir: env::var("EVENTGRID_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".eventgrid")),
            sqlite_path: env::var("EVENTGRID_SQLITE_PATH")
                .unwrap_or_else(|_| "eventgrid.db".to_string()),
            storage_key: env::var("EVENTGRID_STORAGE_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            display_limit: env::var("EVENTGRID_DISPLAY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
