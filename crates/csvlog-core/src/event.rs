//! Change notifications and diagnostics

use std::fmt;

use crate::Setting;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Non-fatal inconsistency, logging proceeds
    Warning,
    /// Operation rejected or row dropped
    Critical,
}

/// A diagnostic raised by the logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity class
    pub severity: Severity,
    /// Human readable message
    pub message: String,
}

impl Diagnostic {
    /// Warning-class diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Critical-class diagnostic
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    /// Forward to the tracing facade at the matching level
    pub(crate) fn trace(&self) {
        match self.severity {
            Severity::Warning => tracing::warn!("{}", self.message),
            Severity::Critical => tracing::error!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.severity, self.message)
    }
}

/// Event delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerEvent {
    /// A setting took a new value
    Changed(Setting),
    /// A diagnostic was raised
    Diagnostic(Diagnostic),
}

impl LoggerEvent {
    /// The diagnostic, if this is one
    pub fn as_diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            LoggerEvent::Diagnostic(d) => Some(d),
            _ => None,
        }
    }
}

/// Subscriber callback
pub type Listener = Box<dyn FnMut(&LoggerEvent)>;
