//! Incremental log record assembly

use super::log_level::LogLevel;
use super::record::{LogRecord, SourceLocation};

/// Accumulates the fields of one record and finalizes it with [`build`].
///
/// The builder is deliberately not reset between builds: message and
/// location persist until overwritten, so a caller that skips
/// `set_message` re-emits the previous text. Callers are expected to set
/// the message before each build.
///
/// Not thread-safe. Confine an instance to a single producer call or to
/// the consumer thread.
///
/// [`build`]: LogBuilder::build
#[derive(Debug, Clone)]
pub struct LogBuilder {
    level: LogLevel,
    logger: String,
    message: String,
    location: Option<SourceLocation>,
}

impl LogBuilder {
    pub fn new(level: LogLevel, logger: impl Into<String>) -> Self {
        Self {
            level,
            logger: logger.into(),
            message: String::new(),
            location: None,
        }
    }

    /// Retag the level for subsequent builds.
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Store the message text for the next build. Takes pre-formatted text;
    /// format substitution belongs at the producer call site.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Store call-site metadata for the next build. Never fails.
    pub fn set_location(&mut self, location: SourceLocation) {
        self.location = Some(location);
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.set_location(location);
        self
    }

    /// Finalize a record, stamping the capture time and the calling
    /// thread's identifier. Message and location state stay in place for
    /// the next build.
    pub fn build(&self) -> LogRecord {
        let record = LogRecord::new(self.level, self.logger.clone(), self.message.clone());
        match self.location {
            Some(location) => record.with_location(location),
            None => record,
        }
    }
}
