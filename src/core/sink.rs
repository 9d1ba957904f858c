//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel, record::LogRecord};

/// A pluggable destination for records.
///
/// The consumer thread owns every registered sink and only offers a record
/// when `enabled()` holds and `should_log(record.level)` passes. A `write`
/// or `flush` error is isolated by the consumer; it never stops delivery
/// to other sinks.
pub trait Sink: Send + Sync {
    fn write(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn set_level(&mut self, level: LogLevel);
    fn level(&self) -> LogLevel;
    fn set_enabled(&mut self, enabled: bool);
    fn enabled(&self) -> bool;
    fn name(&self) -> &str;

    /// True iff a record at `level` passes this sink's threshold, with
    /// `Off` suppressing everything and `All` admitting everything.
    fn should_log(&self, level: LogLevel) -> bool {
        self.level().admits(level)
    }
}
