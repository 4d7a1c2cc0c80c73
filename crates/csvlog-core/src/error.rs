//! Logger errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::Setting;

/// Errors reported by the logger
///
/// None of these are fatal: the logger stays usable after any of them.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// A setting was changed while a file is being written
    #[error("{0} cannot be changed while writing")]
    Locked(Setting),

    /// A relative filename has no base directory to resolve against
    #[error("No writable base directory available to resolve a relative filename")]
    NoBaseDirectory,

    /// A parent directory of the target could not be created
    #[error("Could not create directory {}: {source}", path.display())]
    CreateDirectory {
        /// Directory that failed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The target file could not be opened for appending
    #[error("Could not open file {}: {source}", path.display())]
    Open {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Appending a line failed; the line was dropped
    #[error("Write failed: {0}")]
    Write(#[from] io::Error),

    /// No file is open to write to
    #[error("File is not open, valid filename must be provided beforehand")]
    NotOpen,

    /// A config file could not be read, parsed, or written
    #[error("Config error: {0}")]
    Config(String),
}
