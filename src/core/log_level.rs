//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from most verbose to most severe.
///
/// `Off` and `All` are sentinel filter values: a sink configured with `Off`
/// suppresses every record, one configured with `All` admits every record.
/// Neither is attached to a real event except as an explicit suppression
/// marker, and a record carrying `Off` is never delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Off = 6,
    All = 7,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Off => "OFF",
            LogLevel::All => "ALL",
        }
    }

    /// Parse a level name case-insensitively, degrading unknown input to
    /// `All`.
    ///
    /// The degrade-on-unknown policy is deliberate: callers use an
    /// unrecognized name as a filter-everything escape hatch. Use the
    /// [`FromStr`] impl when a parse failure should surface instead.
    pub fn from_name(s: &str) -> Self {
        s.parse().unwrap_or(LogLevel::All)
    }

    /// Whether a record at `level` passes a sink configured with `self` as
    /// its threshold.
    ///
    /// `Off` admits nothing and `All` admits everything regardless of the
    /// numeric ordering; every other threshold admits levels of equal or
    /// higher severity.
    pub fn admits(&self, level: LogLevel) -> bool {
        match self {
            LogLevel::Off => false,
            LogLevel::All => true,
            threshold => level >= *threshold,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "OFF" => Ok(LogLevel::Off),
            "ALL" => Ok(LogLevel::All),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
