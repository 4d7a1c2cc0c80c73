//! Host platform services
//!
//! The logger asks its host for three things: whether it is enabled, where
//! relative filenames should live, and what time it is.

use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

/// Services supplied by the hosting application
pub trait Platform {
    /// Whether logging is currently enabled
    fn is_enabled(&self) -> bool;

    /// Writable directory relative filenames are resolved against
    fn writable_base_dir(&self) -> Option<PathBuf>;

    /// Current wall-clock time
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Platform backed by the operating system's standard directories
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPlatform;

impl Platform for SystemPlatform {
    fn is_enabled(&self) -> bool {
        true
    }

    fn writable_base_dir(&self) -> Option<PathBuf> {
        system_base_dir()
    }
}

/// Application data directory where document access is restricted
#[cfg(target_os = "windows")]
fn system_base_dir() -> Option<PathBuf> {
    dirs::data_dir().or_else(dirs::home_dir)
}

#[cfg(not(target_os = "windows"))]
fn system_base_dir() -> Option<PathBuf> {
    dirs::document_dir().or_else(dirs::home_dir)
}

/// Platform with fixed answers
#[derive(Debug, Clone)]
pub struct StaticPlatform {
    /// Reported enable flag
    pub enabled: bool,
    /// Base directory for relative filenames
    pub base_dir: Option<PathBuf>,
    /// Frozen clock, `None` uses the local wall clock
    pub clock: Option<NaiveDateTime>,
}

impl StaticPlatform {
    /// Enabled platform resolving relative paths under `base_dir`
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            enabled: true,
            base_dir: Some(base_dir.into()),
            clock: None,
        }
    }

    /// Freeze the clock at `time`
    pub fn with_clock(mut self, time: NaiveDateTime) -> Self {
        self.clock = Some(time);
        self
    }

    /// Set the enable flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Platform for StaticPlatform {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn writable_base_dir(&self) -> Option<PathBuf> {
        self.base_dir.clone()
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }
}
