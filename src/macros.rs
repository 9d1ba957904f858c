//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `println!`, entirely at the call site, and
//! capture the call-site location into the record. The formatted string is
//! what travels through the pipeline; sinks never expand templates.
//!
//! # Examples
//!
//! ```
//! use pipelog::prelude::*;
//! use pipelog::info;
//!
//! let logger = Logger::with_name("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting and location capture.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            $crate::SourceLocation::new(file!(), module_path!(), line!(), column!()),
        )
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use pipelog::prelude::*;
/// # let logger = Logger::new();
/// use pipelog::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};

    #[test]
    fn test_log_macro() {
        let logger = Logger::new();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
    }

    #[test]
    fn test_level_macros() {
        let logger = Logger::new();
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
    }

    #[test]
    fn test_macros_record_call_site() {
        let mut logger = Logger::new();
        info!(logger, "where am i");
        logger.stop();
        assert_eq!(logger.metrics().enqueued(), 1);
    }
}
