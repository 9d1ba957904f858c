//! Core pipeline types and traits

pub mod builder;
pub mod error;
pub mod line_format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod sink;

pub use builder::LogBuilder;
pub use error::{LoggerError, Result};
pub use line_format::{format_line, parse_line, ParsedLine, LINE_TIME_FORMAT};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_IDLE_WAIT};
pub use metrics::CoreMetrics;
pub use queue::BlockingQueue;
pub use record::{LogRecord, SourceLocation};
pub use sink::Sink;
