//! Bundled sink implementations

pub mod file;

pub use file::{FileSink, FileSinkConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_FILE_SIZE};

// Re-export the trait so sink authors can depend on this module alone.
pub use crate::core::Sink;
