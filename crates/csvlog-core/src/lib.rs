//! # csvlog Core Library
//!
//! Append-only CSV line logging with a lazily opened file session.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Row formatting into comma-space separated lines
//! - A file session that opens on first use and writes the header once
//! - Settings that lock while a file is being written
//! - Console mode for sending lines to a console sink instead of a file
//!
//! ## Example
//!
//! ```rust,no_run
//! use csvlog_core::{row, CsvLogger, LoggerConfig};
//!
//! let config = LoggerConfig::new("runs/session.csv", vec!["rpm".into(), "map".into()]);
//! let mut logger = CsvLogger::with_config(config);
//!
//! logger.log(&row![3250.0, 98.6])?;
//! logger.close();
//! # Ok::<(), csvlog_core::LoggerError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod line;
pub mod logger;
pub mod platform;
pub mod session;
pub mod sink;
pub mod value;

pub use config::{LoggerConfig, Setting};
pub use error::LoggerError;
pub use event::{Diagnostic, LoggerEvent, Severity};
pub use line::{DataLine, LengthMismatch, LineBuilder};
pub use logger::{CsvLogger, LogOutcome};
pub use platform::{Platform, StaticPlatform, SystemPlatform};
pub use session::SessionState;
pub use sink::{BufferConsole, ConsoleSink, StderrConsole};
pub use value::Value;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::row;
    pub use crate::{
        CsvLogger, Diagnostic, LogOutcome, LoggerConfig, LoggerError, LoggerEvent, SessionState,
        Setting, Severity, Value,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
