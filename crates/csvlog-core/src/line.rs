//! Line builder
//!
//! Serializes the header and data rows into comma-space separated text.

use chrono::NaiveDateTime;

use crate::{LoggerConfig, Value};

/// Column separator
pub const SEPARATOR: &str = ", ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIMESTAMP_FORMAT_MILLIS: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Row length differs from the header length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    /// Number of header columns
    pub header: usize,
    /// Number of values in the row
    pub row: usize,
}

/// A formatted data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    /// Line text without the trailing newline
    pub text: String,
    /// Set when the row did not match the header length
    pub mismatch: Option<LengthMismatch>,
}

/// Formats lines from the current configuration
#[derive(Debug, Clone, Copy)]
pub struct LineBuilder<'a> {
    config: &'a LoggerConfig,
}

impl<'a> LineBuilder<'a> {
    /// Create a builder over a config
    pub fn new(config: &'a LoggerConfig) -> Self {
        Self { config }
    }

    /// Build the header line: `[timestamp_header, ]header...`
    pub fn header_line(&self) -> String {
        let time = self
            .config
            .log_time
            .then(|| self.config.timestamp_header.clone());

        time.into_iter()
            .chain(self.config.header.iter().cloned())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Build a data line stamped with `timestamp`.
    ///
    /// A length mismatch against the header is reported on the result but
    /// does not stop the line from being built.
    pub fn data_line(&self, row: &[Value], timestamp: NaiveDateTime) -> DataLine {
        let time = self.config.log_time.then(|| self.timestamp(timestamp));
        let precision = self.config.precision;

        let text = time
            .into_iter()
            .chain(row.iter().map(|v| v.render(precision)))
            .collect::<Vec<_>>()
            .join(SEPARATOR);

        let mismatch = (row.len() != self.config.header.len()).then_some(LengthMismatch {
            header: self.config.header.len(),
            row: row.len(),
        });

        DataLine { text, mismatch }
    }

    fn timestamp(&self, timestamp: NaiveDateTime) -> String {
        let format = if self.config.log_millis {
            TIMESTAMP_FORMAT_MILLIS
        } else {
            TIMESTAMP_FORMAT
        };
        timestamp.format(format).to_string()
    }
}
