//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::cell::RefCell;

// Thread-local cache for the thread identifier to avoid repeated formatting
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

/// Call-site metadata captured once by the logging macros.
///
/// `module_path` stands in for the enclosing function name, which has no
/// stable macro in Rust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub module_path: &'static str,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, module_path: &'static str, line: u32, column: u32) -> Self {
        Self {
            file,
            module_path,
            line,
            column,
        }
    }
}

/// One log event, immutable after construction.
///
/// The record is owned by the queue from push until pop, then by the
/// consumer, which lends it to each sink during dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub thread_id: String,
    pub location: Option<SourceLocation>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a message can never forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger: logger.into(),
            message: Self::sanitize_message(&message.into()),
            timestamp: Local::now(),
            thread_id: get_thread_id(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether this record may reach a sink.
    ///
    /// Records with an empty message or the `Off` level are discarded by the
    /// consumer without ever being offered to a sink.
    pub fn is_deliverable(&self) -> bool {
        !self.message.is_empty() && self.level != LogLevel::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sanitization() {
        let record = LogRecord::new(LogLevel::Info, "app", "line1\nline2\rline3\tend");
        assert_eq!(record.message, "line1\\nline2\\rline3\\tend");
    }

    #[test]
    fn test_deliverable_requires_message_and_level() {
        assert!(LogRecord::new(LogLevel::Info, "app", "hello").is_deliverable());
        assert!(!LogRecord::new(LogLevel::Info, "app", "").is_deliverable());
        assert!(!LogRecord::new(LogLevel::Off, "app", "hello").is_deliverable());
        assert!(LogRecord::new(LogLevel::All, "app", "hello").is_deliverable());
    }

    #[test]
    fn test_thread_id_is_stable_within_thread() {
        let a = LogRecord::new(LogLevel::Info, "app", "one");
        let b = LogRecord::new(LogLevel::Info, "app", "two");
        assert_eq!(a.thread_id, b.thread_id);
        assert!(!a.thread_id.is_empty());
    }

    #[test]
    fn test_with_location() {
        let loc = SourceLocation::new("src/main.rs", "app::server", 42, 9);
        let record = LogRecord::new(LogLevel::Debug, "app", "located").with_location(loc);
        assert_eq!(record.location, Some(loc));
        assert_eq!(record.location.map(|l| l.line), Some(42));
    }
}
