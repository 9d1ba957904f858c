//! Canonical plain-text line format
//!
//! Every persisted record is one line: `YYYY-MM-DD HH:MM:SS [LEVEL]
//! message` with a trailing newline. The parser exists for log readers and
//! for the round-trip tests; the pipeline itself only formats.

use super::log_level::LogLevel;
use super::record::LogRecord;
use chrono::NaiveDateTime;

/// Timestamp layout used in every persisted line (second precision).
pub const LINE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a record as its persisted line, trailing newline included.
pub fn format_line(record: &LogRecord) -> String {
    format!(
        "{} [{}] {}\n",
        record.timestamp.format(LINE_TIME_FORMAT),
        record.level,
        record.message
    )
}

/// A line read back from a log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: NaiveDateTime,
    pub level: LogLevel,
    pub message: String,
}

/// Parse one persisted line back into its parts.
///
/// Returns `None` for text that does not match the canonical layout. The
/// level must be one of the eight exact names; the message is everything
/// after the first `"] "` and may itself contain brackets.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.strip_suffix('\n').unwrap_or(line);

    // The timestamp is a fixed 19 ASCII bytes.
    let ts_part = line.get(..19)?;
    let rest = line.get(19..)?;
    let timestamp = NaiveDateTime::parse_from_str(ts_part, LINE_TIME_FORMAT).ok()?;

    let rest = rest.strip_prefix(" [")?;
    let (level_part, message) = rest.split_once("] ")?;
    let level = level_part.parse::<LogLevel>().ok()?;

    Some(ParsedLine {
        timestamp,
        level,
        message: message.to_string(),
    })
}
