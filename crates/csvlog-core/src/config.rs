//! Logger configuration
//!
//! Settings owned by a [`CsvLogger`](crate::CsvLogger), persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::LoggerError;

/// Default label of the timestamp column
pub const DEFAULT_TIMESTAMP_HEADER: &str = "timestamp";

/// Default number of fractional digits for float values
pub const DEFAULT_PRECISION: usize = 2;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Target file, relative paths resolve against the platform base directory
    pub filename: PathBuf,

    /// Column names, in row order
    pub header: Vec<String>,

    /// Prepend a wall-clock timestamp column
    pub log_time: bool,

    /// Include milliseconds in the timestamp
    pub log_millis: bool,

    /// Emit lines to the console sink instead of the file
    pub to_console: bool,

    /// Fractional digits for float values
    pub precision: usize,

    /// Label of the timestamp column in the header line
    pub timestamp_header: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::new(),
            header: Vec::new(),
            log_time: true,
            log_millis: true,
            to_console: false,
            precision: DEFAULT_PRECISION,
            timestamp_header: DEFAULT_TIMESTAMP_HEADER.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Create a config for the given file and columns, other fields default
    pub fn new<P: Into<PathBuf>>(filename: P, header: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            header,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoggerError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| LoggerError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse a config from JSON text
    pub fn from_json(content: &str) -> Result<Self, LoggerError> {
        serde_json::from_str(content).map_err(|e| LoggerError::Config(e.to_string()))
    }

    /// Save the config as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LoggerError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| LoggerError::Config(e.to_string()))?;
        fs::write(path.as_ref(), content)
            .map_err(|e| LoggerError::Config(format!("{}: {}", path.as_ref().display(), e)))
    }
}

/// A single configurable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Setting {
    /// Target file path
    Filename,
    /// Column names
    Header,
    /// Timestamp column toggle
    LogTime,
    /// Millisecond timestamp toggle
    LogMillis,
    /// Console mode toggle
    ToConsole,
    /// Float precision
    Precision,
    /// Timestamp column label
    TimestampHeader,
}

impl Setting {
    /// Whether the setting is frozen while a file is being written
    pub fn locked_while_writing(&self) -> bool {
        matches!(
            self,
            Setting::Header | Setting::LogTime | Setting::ToConsole | Setting::TimestampHeader
        )
    }

    /// Field name as used in the JSON config
    pub fn name(&self) -> &'static str {
        match self {
            Setting::Filename => "filename",
            Setting::Header => "header",
            Setting::LogTime => "log_time",
            Setting::LogMillis => "log_millis",
            Setting::ToConsole => "to_console",
            Setting::Precision => "precision",
            Setting::TimestampHeader => "timestamp_header",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
