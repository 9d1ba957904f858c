//! Buffered file sink with size-based rotation
//!
//! Records are formatted into an in-memory byte buffer and flushed to the
//! current log file after every write. When the current file plus pending
//! bytes would exceed the configured maximum, the sink rotates to a fresh
//! timestamped file in the same directory.

use crate::core::error::{LoggerError, Result};
use crate::core::line_format::format_line;
use crate::core::log_level::LogLevel;
use crate::core::record::LogRecord;
use crate::core::sink::Sink;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default maximum size of one log file before rotation
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default capacity of the in-memory write buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Timestamp layout embedded in rotated file names
const FILE_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Configuration for the file sink
///
/// # Examples
///
/// ```
/// use pipelog::{FileSinkConfig, LogLevel};
///
/// let config = FileSinkConfig::new()
///     .with_level(LogLevel::Info)
///     .with_max_file_size(50 * 1024 * 1024)
///     .with_directory("/var/log/app")
///     .with_prefix("app");
///
/// assert_eq!(config.level, LogLevel::Info);
/// assert_eq!(config.prefix, "app");
/// ```
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Minimum severity admitted by the sink
    pub level: LogLevel,
    /// Maximum size of one file in bytes before rotation
    pub max_file_size: u64,
    /// Capacity of the in-memory write buffer in bytes
    pub buffer_capacity: usize,
    /// Directory receiving the log files, created recursively if absent
    pub directory: PathBuf,
    /// File name prefix, completed as `{prefix}_{YYYYMMDD_HHMMSS}.log`
    pub prefix: String,
    /// Whether the sink accepts records at all
    pub enabled: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Trace,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            directory: PathBuf::from("log"),
            prefix: String::from("log"),
            enabled: true,
        }
    }
}

impl FileSinkConfig {
    /// Create a configuration with the default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum severity admitted by the sink
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the maximum file size in bytes before rotation
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Set the in-memory buffer capacity in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    /// Set the target directory
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the file name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set whether the sink starts enabled
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Truncate an oversized formatted line to `max_len` bytes, keeping the
/// trailing newline and never splitting a UTF-8 sequence.
fn truncate_line(line: &str, max_len: usize) -> String {
    if line.len() <= max_len {
        return line.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    // Reserve one byte for the newline, then back up to a char boundary.
    let mut end = max_len - 1;
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }

    let mut truncated = line[..end].to_string();
    truncated.push('\n');
    truncated
}

/// Buffered, size-rotating file sink
///
/// Owned exclusively by the consumer thread; no internal locking. The
/// buffer is cleared on each flush, never reallocated, so memory use stays
/// bounded at the configured capacity.
///
/// # Examples
///
/// ```no_run
/// use pipelog::{FileSink, FileSinkConfig, LogLevel};
///
/// // Defaults: TRACE threshold, 10 MiB files, 8 KiB buffer, "log" directory
/// let sink = FileSink::new().unwrap();
///
/// let sink = FileSink::with_config(
///     FileSinkConfig::new()
///         .with_level(LogLevel::Warn)
///         .with_directory("/var/log/app")
///         .with_prefix("app"),
/// )
/// .unwrap();
/// ```
pub struct FileSink {
    level: LogLevel,
    enabled: bool,
    max_file_size: u64,
    buffer_capacity: usize,
    buffer: Vec<u8>,
    directory: PathBuf,
    prefix: String,
    file: Option<File>,
    current_path: PathBuf,
    current_size: u64,
}

impl FileSink {
    /// Create a file sink with the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the first file cannot be
    /// created.
    pub fn new() -> Result<Self> {
        Self::with_config(FileSinkConfig::default())
    }

    /// Create a file sink with a custom configuration
    ///
    /// Opens the first output file immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the first file cannot be
    /// created.
    pub fn with_config(config: FileSinkConfig) -> Result<Self> {
        let mut sink = Self {
            level: config.level,
            enabled: config.enabled,
            max_file_size: config.max_file_size,
            buffer_capacity: config.buffer_capacity,
            buffer: Vec::with_capacity(config.buffer_capacity),
            directory: config.directory,
            prefix: config.prefix,
            file: None,
            current_path: PathBuf::new(),
            current_size: 0,
        };
        sink.create_new_file()?;
        Ok(sink)
    }

    /// Path of the file currently being written
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }

    /// Bytes already persisted to the current file
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Open a fresh `{prefix}_{YYYYMMDD_HHMMSS}.log` under the configured
    /// directory, creating the directory recursively if absent.
    ///
    /// The name is generated from the current instant each time; two
    /// rotations inside the same second reopen the same file in append
    /// mode, with the size re-read from its metadata.
    fn create_new_file(&mut self) -> Result<()> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", self.directory.display()),
                e,
            )
        })?;

        let file_name = format!("{}_{}.log", self.prefix, Local::now().format(FILE_TIME_FORMAT));
        let path = self.directory.join(file_name);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let metadata = file.metadata().map_err(|e| {
            LoggerError::file_sink(
                path.display().to_string(),
                format!("Cannot access file metadata: {}", e),
            )
        })?;

        self.current_size = metadata.len();
        self.file = Some(file);
        self.current_path = path;
        Ok(())
    }

    /// Write buffered bytes to the current file and clear the buffer.
    ///
    /// On failure the buffered bytes are dropped and the file handle is
    /// released; the next write reopens. Keeping failed bytes around would
    /// grow memory without bound and could interleave partial lines into
    /// later records.
    fn flush_buffer(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("log file not open"))?;

        match file.write_all(&self.buffer) {
            Ok(()) => {
                self.current_size += self.buffer.len() as u64;
                self.buffer.clear();
                Ok(())
            }
            Err(e) => {
                self.buffer.clear();
                self.file = None;
                Err(LoggerError::io_operation(
                    "flushing log buffer",
                    format!("Failed to write to '{}'", self.current_path.display()),
                    e,
                ))
            }
        }
    }

    /// Flush residual bytes into the current file, close it, and open the
    /// next timestamped file.
    fn rotate(&mut self) -> Result<()> {
        self.flush_buffer()?;
        if let Some(file) = self.file.take() {
            let _ = file.sync_all();
        }
        self.create_new_file().map_err(|e| {
            LoggerError::file_rotation(
                self.current_path.display().to_string(),
                e.to_string(),
            )
        })
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        "FileSink"
    }

    /// Buffer one record and flush it to the current file.
    ///
    /// The checks run in a fixed order because each one feeds the size
    /// accounting of the next: filter, format (with truncation to the
    /// buffer capacity), flush the buffer if the line would overflow it,
    /// rotate if the file plus pending bytes plus the line would exceed
    /// the maximum file size, then buffer and flush.
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        if !self.enabled || !self.should_log(record.level) {
            return Ok(());
        }

        let mut line = format_line(record);
        if line.len() > self.buffer_capacity {
            line = truncate_line(&line, self.buffer_capacity);
        }

        // Recover the stream if a previous flush failure dropped it.
        if self.file.is_none() {
            self.create_new_file()?;
        }

        if self.buffer.len() + line.len() > self.buffer_capacity {
            self.flush_buffer()?;
        }

        if self.current_size + self.buffer.len() as u64 + line.len() as u64 > self.max_file_size {
            self.rotate()?;
        }

        self.buffer.extend_from_slice(line.as_bytes());
        self.flush_buffer()
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        if let Some(file) = self.file.as_mut() {
            file.sync_all().map_err(|e| {
                LoggerError::io_operation(
                    "syncing log file",
                    format!("Failed to sync '{}'", self.current_path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    fn level(&self) -> LogLevel {
        self.level
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Best effort flush - ignore errors during drop
        let _ = self.flush_buffer();
        if let Some(file) = self.file.take() {
            let _ = file.sync_all();
        }
    }
}
