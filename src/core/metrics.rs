//! Pipeline counters for observability
//!
//! Tracks how many records entered the queue, how many reached sinks, how
//! many were discarded as invalid, and how many sink writes failed. The
//! operator layer reads these; the pipeline itself never inspects them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for pipeline health
///
/// # Example
///
/// ```
/// use pipelog::CoreMetrics;
///
/// let metrics = CoreMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_dispatched();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.dispatched(), 1);
/// ```
#[derive(Debug)]
pub struct CoreMetrics {
    /// Number of records accepted into the queue
    enqueued: AtomicU64,

    /// Number of deliverable records handed to at least one sink pass
    dispatched: AtomicU64,

    /// Number of records discarded as invalid (empty message or OFF level)
    discarded: AtomicU64,

    /// Number of sink write/flush failures (including panics)
    sink_errors: AtomicU64,
}

impl CoreMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            sink_errors: AtomicU64::new(0),
        }
    }

    /// Get the number of records accepted into the queue
    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Get the number of records dispatched to sinks
    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Get the number of records discarded as invalid
    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Get the number of sink failures
    #[inline]
    pub fn sink_errors(&self) -> u64 {
        self.sink_errors.load(Ordering::Relaxed)
    }

    /// Record a record accepted into the queue
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a record dispatched to sinks
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a record discarded as invalid
    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.discarded.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a sink write/flush failure
    #[inline]
    pub fn record_sink_error(&self) -> u64 {
        self.sink_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Fraction of consumed records that were discarded, as a percentage
    /// (0.0 - 100.0). Returns 0.0 before anything has been consumed.
    pub fn discard_rate(&self) -> f64 {
        let discarded = self.discarded() as f64;
        let total = self.dispatched() as f64 + discarded;
        if total == 0.0 {
            0.0
        } else {
            (discarded / total) * 100.0
        }
    }

    /// Reset all counters to zero
    ///
    /// Useful for testing or periodic reset of metrics.
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
        self.sink_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for CoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CoreMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            dispatched: AtomicU64::new(self.dispatched()),
            discarded: AtomicU64::new(self.discarded()),
            sink_errors: AtomicU64::new(self.sink_errors()),
        }
    }
}
