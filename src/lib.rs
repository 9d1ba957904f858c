//! # Pipelog
//!
//! An in-process asynchronous logging pipeline. Producers enqueue records
//! without blocking on I/O; a single background consumer drains the queue
//! and dispatches each record to pluggable sinks in enqueue order.
//!
//! ## Features
//!
//! - **Non-blocking emit**: producers never wait for sink I/O
//! - **Ordered delivery**: one consumer thread preserves global FIFO order
//! - **Per-sink filtering**: each sink carries its own level threshold
//! - **Rotating file sink**: buffered writes, size-based rotation, timestamped file names
//! - **Fault isolation**: a failing sink never takes down the pipeline or its neighbors
//!
//! ## Quick start
//!
//! ```no_run
//! use pipelog::prelude::*;
//!
//! fn main() -> pipelog::Result<()> {
//!     let mut logger = Logger::builder()
//!         .name("app")
//!         .sink(FileSink::new()?)
//!         .build();
//!
//!     logger.info("service starting");
//!     pipelog::warn!(logger, "cache miss rate {}%", 12);
//!
//!     logger.stop();
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        BlockingQueue, CoreMetrics, LogBuilder, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerError, Result, Sink, SourceLocation, DEFAULT_IDLE_WAIT,
    };
    pub use crate::sinks::{FileSink, FileSinkConfig};
}

pub use core::{
    format_line, parse_line, BlockingQueue, CoreMetrics, LogBuilder, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerError, ParsedLine, Result, Sink, SourceLocation, DEFAULT_IDLE_WAIT,
    LINE_TIME_FORMAT,
};
pub use sinks::{FileSink, FileSinkConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_FILE_SIZE};
