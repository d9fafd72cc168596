//! Application messages for inter-thread communication.

use foodmap_core::{Coordinate, LocationError};

/// Who asked for a position lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOrigin {
    /// The one-shot lookup issued when the app starts.
    Startup,
    /// The on-map "show my location" button.
    Control,
}

/// Messages sent from background threads to the main UI loop.
#[derive(Debug)]
pub enum AppMessage {
    /// A position lookup succeeded.
    LocationFound {
        origin: LocationOrigin,
        position: Coordinate,
    },
    /// A position lookup failed.
    LocationFailed {
        origin: LocationOrigin,
        error: LocationError,
    },
    /// A log message for the console.
    Log(LogEntry),
}

/// Log level for console messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// A log entry for the console panel.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: std::time::SystemTime,
}

impl LogEntry {
    fn new(level: LogLevel, msg: impl Into<String>) -> Self {
        Self {
            level,
            message: msg.into(),
            timestamp: std::time::SystemTime::now(),
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, msg)
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, msg)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, msg)
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level() {
        assert_eq!(LogEntry::info("a").level, LogLevel::Info);
        assert_eq!(LogEntry::warning("b").level, LogLevel::Warning);
        assert_eq!(LogEntry::error("c").level, LogLevel::Error);
        let ok = LogEntry::success("d");
        assert_eq!(ok.level, LogLevel::Success);
        assert_eq!(ok.message, "d");
    }
}
