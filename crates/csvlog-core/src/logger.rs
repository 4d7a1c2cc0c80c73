//! CSV logger
//!
//! Owns the configuration and the file session. Rows submitted through
//! [`CsvLogger::log`] are formatted by the [`LineBuilder`] and appended to
//! the target file, which is opened lazily and receives its header exactly
//! once while empty.

use std::path::{Path, PathBuf};

use crate::event::Listener;
use crate::line::LineBuilder;
use crate::platform::{Platform, SystemPlatform};
use crate::session::{OpenFile, Session, SessionState};
use crate::sink::{ConsoleSink, StderrConsole};
use crate::{Diagnostic, LoggerConfig, LoggerError, LoggerEvent, Setting, Value};

/// Result of a successful [`CsvLogger::log`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The platform reported the logger as disabled, nothing happened
    Disabled,
    /// The line went to the console sink
    Console,
    /// The line was appended to the file
    Written {
        /// Whether this call also wrote the header line
        header_written: bool,
    },
}

/// Line logger writing rows to a file or the console
pub struct CsvLogger {
    config: LoggerConfig,
    session: Session,
    platform: Box<dyn Platform>,
    console: Box<dyn ConsoleSink>,
    listeners: Vec<Listener>,
}

impl CsvLogger {
    /// Create a logger with default settings and no filename
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    /// Create a logger from a config using the system platform
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::with_platform(config, SystemPlatform)
    }

    /// Create a logger from a config and host platform
    pub fn with_platform<P: Platform + 'static>(config: LoggerConfig, platform: P) -> Self {
        let session = if config.filename.as_os_str().is_empty() {
            Session::Closed
        } else {
            Session::NeedsReopen
        };

        Self {
            config,
            session,
            platform: Box::new(platform),
            console: Box::new(StderrConsole),
            listeners: Vec::new(),
        }
    }

    /// Replace the console sink
    pub fn with_console<S: ConsoleSink + 'static>(mut self, console: S) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Register a listener for change notifications and diagnostics
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&LoggerEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current configuration
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Target filename; absolute once the file has been opened
    pub fn filename(&self) -> &Path {
        &self.config.filename
    }

    /// Column names
    pub fn header(&self) -> &[String] {
        &self.config.header
    }

    /// Whether a timestamp column is logged
    pub fn log_time(&self) -> bool {
        self.config.log_time
    }

    /// Whether timestamps carry milliseconds
    pub fn log_millis(&self) -> bool {
        self.config.log_millis
    }

    /// Whether lines go to the console instead of the file
    pub fn to_console(&self) -> bool {
        self.config.to_console
    }

    /// Fractional digits for float values
    pub fn precision(&self) -> usize {
        self.config.precision
    }

    /// Label of the timestamp column
    pub fn timestamp_header(&self) -> &str {
        &self.config.timestamp_header
    }

    /// Session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Whether a file is open and has received its header
    pub fn is_writing(&self) -> bool {
        self.session.state() == SessionState::Open
    }

    /// Header line a new file receives with the current settings
    pub fn header_line(&self) -> String {
        LineBuilder::new(&self.config).header_line()
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    /// Change the target file.
    ///
    /// Any open file is flushed and closed; the next [`log`](Self::log)
    /// opens the new one. Returns whether the filename changed.
    pub fn set_filename<P: Into<PathBuf>>(&mut self, filename: P) -> bool {
        let filename = filename.into();
        if self.config.filename == filename {
            return false;
        }

        self.session.close();
        self.config.filename = filename;
        self.changed(Setting::Filename);
        true
    }

    /// Change the column names. Rejected while writing.
    pub fn set_header(&mut self, header: Vec<String>) -> Result<bool, LoggerError> {
        if self.config.header == header {
            return Ok(false);
        }
        self.check_unlocked(Setting::Header)?;
        self.config.header = header;
        self.changed(Setting::Header);
        Ok(true)
    }

    /// Toggle the timestamp column. Rejected while writing.
    pub fn set_log_time(&mut self, log_time: bool) -> Result<bool, LoggerError> {
        if self.config.log_time == log_time {
            return Ok(false);
        }
        self.check_unlocked(Setting::LogTime)?;
        self.config.log_time = log_time;
        self.changed(Setting::LogTime);
        Ok(true)
    }

    /// Toggle console mode. Rejected while writing.
    pub fn set_to_console(&mut self, to_console: bool) -> Result<bool, LoggerError> {
        if self.config.to_console == to_console {
            return Ok(false);
        }
        self.check_unlocked(Setting::ToConsole)?;
        self.config.to_console = to_console;
        self.changed(Setting::ToConsole);
        Ok(true)
    }

    /// Change the timestamp column label. Rejected while writing.
    pub fn set_timestamp_header<S: Into<String>>(&mut self, label: S) -> Result<bool, LoggerError> {
        let label = label.into();
        if self.config.timestamp_header == label {
            return Ok(false);
        }
        self.check_unlocked(Setting::TimestampHeader)?;
        self.config.timestamp_header = label;
        self.changed(Setting::TimestampHeader);
        Ok(true)
    }

    /// Toggle milliseconds in timestamps
    pub fn set_log_millis(&mut self, log_millis: bool) -> bool {
        if self.config.log_millis == log_millis {
            return false;
        }
        self.config.log_millis = log_millis;
        self.changed(Setting::LogMillis);
        true
    }

    /// Change the number of fractional digits for floats
    pub fn set_precision(&mut self, precision: usize) -> bool {
        if self.config.precision == precision {
            return false;
        }
        self.config.precision = precision;
        self.changed(Setting::Precision);
        true
    }

    /// Apply every field of `config` through the individual setters.
    ///
    /// Stops at the first rejected setting; fields applied before it keep
    /// their new values.
    pub fn apply_config(&mut self, config: LoggerConfig) -> Result<(), LoggerError> {
        let LoggerConfig {
            filename,
            header,
            log_time,
            log_millis,
            to_console,
            precision,
            timestamp_header,
        } = config;

        self.set_filename(filename);
        self.set_header(header)?;
        self.set_log_time(log_time)?;
        self.set_to_console(to_console)?;
        self.set_timestamp_header(timestamp_header)?;
        self.set_log_millis(log_millis);
        self.set_precision(precision);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Logging
    // ------------------------------------------------------------------

    /// Log one row.
    ///
    /// A failed call drops the row, raises a critical diagnostic and
    /// leaves the logger usable; the next call retries a failed open.
    pub fn log(&mut self, row: &[Value]) -> Result<LogOutcome, LoggerError> {
        if !self.platform.is_enabled() {
            return Ok(LogOutcome::Disabled);
        }

        if self.config.to_console {
            let line = self.build_line(row);
            self.console.emit(&line);
            return Ok(LogOutcome::Console);
        }

        let mut header_written = false;
        if matches!(self.session, Session::NeedsReopen) {
            header_written = match self.reopen() {
                Ok(written) => written,
                Err(e) => return Err(self.fail(e)),
            };
        }

        let line = self.build_line(row);
        let result = match &mut self.session {
            Session::Open(file) => file.write_line(&line).map_err(LoggerError::Write),
            _ => Err(LoggerError::NotOpen),
        };

        match result {
            Ok(()) => Ok(LogOutcome::Written { header_written }),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Flush and close the file. The next log call reopens it.
    pub fn close(&mut self) {
        self.session.close();
    }

    fn reopen(&mut self) -> Result<bool, LoggerError> {
        let path = self.resolve_filename()?;
        let mut file = OpenFile::open(&path)?;
        tracing::debug!("Opened {} for appending", path.display());

        let mut header_written = false;
        if file.was_empty() {
            let header = self.header_line();
            if !header.is_empty() {
                file.write_line(&header)?;
                header_written = true;
            }
        }

        self.session = Session::Open(file);
        Ok(header_written)
    }

    /// Absolute target path, resolving a relative filename against the
    /// platform base directory and storing the result.
    fn resolve_filename(&mut self) -> Result<PathBuf, LoggerError> {
        if self.config.filename.is_absolute() {
            return Ok(self.config.filename.clone());
        }

        let base = self
            .platform
            .writable_base_dir()
            .ok_or(LoggerError::NoBaseDirectory)?;
        let resolved = base.join(&self.config.filename);
        tracing::info!("Absolute path not given, logging to {}", resolved.display());

        self.config.filename = resolved.clone();
        self.changed(Setting::Filename);
        Ok(resolved)
    }

    fn build_line(&mut self, row: &[Value]) -> String {
        let line = LineBuilder::new(&self.config).data_line(row, self.platform.now());
        if let Some(m) = line.mismatch {
            self.report(Diagnostic::warning(format!(
                "Row has {} values but header has {} columns, log file will not be aligned",
                m.row, m.header
            )));
        }
        line.text
    }

    fn check_unlocked(&mut self, setting: Setting) -> Result<(), LoggerError> {
        if self.is_writing() && setting.locked_while_writing() {
            return Err(self.fail(LoggerError::Locked(setting)));
        }
        Ok(())
    }

    /// Report `error` as a critical diagnostic and hand it back.
    fn fail(&mut self, error: LoggerError) -> LoggerError {
        self.report(Diagnostic::critical(error.to_string()));
        error
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.trace();
        self.notify(LoggerEvent::Diagnostic(diagnostic));
    }

    fn changed(&mut self, setting: Setting) {
        self.notify(LoggerEvent::Changed(setting));
    }

    fn notify(&mut self, event: LoggerEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for CsvLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CsvLogger {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CsvLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvLogger")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
