//! Console sinks
//!
//! Destinations for lines when the logger runs in console mode.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Receives one formatted line per console-mode log call
pub trait ConsoleSink {
    /// Emit a line (without trailing newline)
    fn emit(&mut self, line: &str);
}

/// Writes lines to standard error
#[derive(Debug, Default)]
pub struct StderrConsole;

impl ConsoleSink for StderrConsole {
    fn emit(&mut self, line: &str) {
        let mut err = io::stderr().lock();
        if let Err(e) = writeln!(err, "{}", line) {
            tracing::warn!("Console write failed: {e}");
        }
    }
}

/// Collects lines in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferConsole {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Number of lines emitted
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl ConsoleSink for BufferConsole {
    fn emit(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
