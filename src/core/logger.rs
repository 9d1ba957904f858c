//! Logger core owning the queue, the consumer thread, and the sink set

use super::{
    builder::LogBuilder,
    error::Result,
    log_level::LogLevel,
    metrics::CoreMetrics,
    queue::BlockingQueue,
    record::{LogRecord, SourceLocation},
    sink::Sink,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Upper bound on records dispatched per sink-lock acquisition
const MAX_BATCH: usize = 50;

/// Default bound on the consumer's idle wait between queue checks
///
/// The wait is a condition-variable wait, so new records wake the consumer
/// immediately; this bound only caps how long a stop request can sit
/// unnoticed while the queue is empty.
pub const DEFAULT_IDLE_WAIT: Duration = Duration::from_millis(100);

/// Asynchronous logging pipeline.
///
/// Producers enqueue records without blocking; one consumer thread,
/// started at construction, drains the queue and dispatches each
/// deliverable record to every enabled, admitting sink. [`stop`] signals
/// the consumer, drains everything enqueued beforehand, and joins the
/// thread; dropping the logger does the same.
///
/// # Example
///
/// ```
/// use pipelog::{Logger, LogLevel};
///
/// let mut logger = Logger::with_name("app");
/// logger.info("service starting");
/// logger.log(LogLevel::Warn, "low disk space");
/// logger.stop();
/// ```
///
/// [`stop`]: Logger::stop
pub struct Logger {
    name: String,
    queue: Arc<BlockingQueue<LogRecord>>,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    sinks: Arc<RwLock<Vec<Box<dyn Sink>>>>,
    metrics: Arc<CoreMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("logger")
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::start(name.into(), Vec::new(), DEFAULT_IDLE_WAIT)
    }

    /// Spawn the consumer thread and hand it the shared queue, running
    /// flag, sink set, and counters.
    fn start(name: String, sinks: Vec<Box<dyn Sink>>, idle_wait: Duration) -> Self {
        let queue = Arc::new(BlockingQueue::new());
        let running = Arc::new(AtomicBool::new(true));
        let sinks = Arc::new(RwLock::new(sinks));
        let metrics = Arc::new(CoreMetrics::new());

        let queue_clone = Arc::clone(&queue);
        let running_clone = Arc::clone(&running);
        let sinks_clone = Arc::clone(&sinks);
        let metrics_clone = Arc::clone(&metrics);

        let handle = thread::spawn(move || {
            Self::consumer_loop(
                &queue_clone,
                &running_clone,
                &sinks_clone,
                &metrics_clone,
                idle_wait,
            );
        });

        Self {
            name,
            queue,
            running,
            handle: Some(handle),
            sinks,
            metrics,
        }
    }

    /// Consumer body: wait for work while running, then drain and exit.
    ///
    /// While running, each pass waits on the queue (bounded by
    /// `idle_wait`), micro-batches whatever else is immediately ready, and
    /// dispatches the batch. Once the running flag clears, the loop
    /// switches to non-blocking pops until the queue reports empty, with
    /// no further waiting.
    fn consumer_loop(
        queue: &BlockingQueue<LogRecord>,
        running: &AtomicBool,
        sinks: &RwLock<Vec<Box<dyn Sink>>>,
        metrics: &CoreMetrics,
        idle_wait: Duration,
    ) {
        let mut batch = Vec::with_capacity(MAX_BATCH);

        while running.load(Ordering::Acquire) {
            let Some(first) = queue.pop_timeout(idle_wait) else {
                continue;
            };
            batch.push(first);
            while batch.len() < MAX_BATCH {
                match queue.try_pop() {
                    Some(record) => batch.push(record),
                    None => break,
                }
            }

            Self::dispatch_batch(sinks, &batch, metrics);
            batch.clear();
        }

        // Draining: everything enqueued before the stop signal is still
        // delivered, in order.
        while let Some(record) = queue.try_pop() {
            batch.push(record);
            if batch.len() >= MAX_BATCH {
                Self::dispatch_batch(sinks, &batch, metrics);
                batch.clear();
            }
        }
        if !batch.is_empty() {
            Self::dispatch_batch(sinks, &batch, metrics);
        }
    }

    /// Dispatch a batch of records under one sink-lock acquisition.
    ///
    /// Invalid records are discarded here and never reach a sink. Each
    /// sink call is wrapped in `catch_unwind` so one failing or panicking
    /// sink cannot take down the consumer or starve the remaining sinks.
    fn dispatch_batch(
        sinks: &RwLock<Vec<Box<dyn Sink>>>,
        batch: &[LogRecord],
        metrics: &CoreMetrics,
    ) {
        let mut sinks_guard = sinks.write();

        for record in batch {
            if !record.is_deliverable() {
                metrics.record_discarded();
                continue;
            }

            for (idx, sink) in sinks_guard.iter_mut().enumerate() {
                if !sink.enabled() || !sink.should_log(record.level) {
                    continue;
                }

                let write_result =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(record)));

                match write_result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        eprintln!(
                            "[LOGGER ERROR] Sink #{} ({}) failed: {}",
                            idx,
                            sink.name(),
                            e
                        );
                        metrics.record_sink_error();
                    }
                    Err(panic) => {
                        eprintln!(
                            "[LOGGER CRITICAL] Sink #{} panicked: {}. \
                             Other sinks continue to function.",
                            idx,
                            panic_message(panic.as_ref())
                        );
                        metrics.record_sink_error();
                    }
                }
            }

            metrics.record_dispatched();
        }

        // Flush after each batch, with the same per-sink isolation.
        for (idx, sink) in sinks_guard.iter_mut().enumerate() {
            let flush_result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush()));

            match flush_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} flush failed: {}", idx, e);
                    metrics.record_sink_error();
                }
                Err(panic) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} panicked during flush: {}. \
                         Other sinks continue to function.",
                        idx,
                        panic_message(panic.as_ref())
                    );
                    metrics.record_sink_error();
                }
            }
        }
    }

    /// Register a sink. Records already in flight are dispatched to it
    /// from the next batch onward.
    pub fn add_sink(&mut self, sink: Box<dyn Sink>) {
        let mut sinks = self.sinks.write();
        sinks.push(sink);
    }

    /// Emit a record at `level`. Fire and forget: never blocks on sink
    /// I/O and never surfaces an error to the caller.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let mut builder = LogBuilder::new(level, self.name.clone());
        builder.set_message(message);
        self.enqueue(builder.build());
    }

    /// Emit a record carrying call-site metadata. The logging macros route
    /// here with the location captured at their expansion site.
    pub fn log_at(&self, level: LogLevel, message: impl Into<String>, location: SourceLocation) {
        let mut builder = LogBuilder::new(level, self.name.clone());
        builder.set_message(message);
        builder.set_location(location);
        self.enqueue(builder.build());
    }

    fn enqueue(&self, record: LogRecord) {
        // Logger is stopping or stopped: silently ignore.
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        self.queue.push(record);
        self.metrics.record_enqueued();
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Flush every sink.
    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Signal the consumer, wait for it to drain everything enqueued
    /// before this call, and join the thread.
    ///
    /// Idempotent: repeated calls return immediately. By the time this
    /// returns, every earlier record has been dispatched to sinks or
    /// discarded as invalid, and the queue is empty.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                eprintln!("[LOGGER ERROR] Consumer thread panicked during shutdown");
            }
            if let Err(e) = self.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Records enqueued but not yet consumed
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pipeline counters for observability
    ///
    /// # Example
    ///
    /// ```
    /// use pipelog::Logger;
    ///
    /// let mut logger = Logger::with_name("app");
    /// logger.info("hello");
    /// logger.stop();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.enqueued(), 1);
    /// ```
    pub fn metrics(&self) -> &CoreMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop();

        let errors = self.metrics.sink_errors();
        if errors > 0 {
            eprintln!("[LOGGER WARNING] Logger stopped with {} sink errors", errors);
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
///
/// ```no_run
/// use pipelog::{FileSink, Logger};
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .name("app")
///     .sink(FileSink::new().unwrap())
///     .idle_wait(Duration::from_millis(20))
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    sinks: Vec<Box<dyn Sink>>,
    idle_wait: Duration,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::from("logger"),
            sinks: Vec::new(),
            idle_wait: DEFAULT_IDLE_WAIT,
        }
    }

    /// Set the logger name stamped into every record
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Bound the consumer's idle wait between queue checks
    ///
    /// Smaller values make `stop` react faster on an idle pipeline at the
    /// cost of more wakeups.
    #[must_use = "builder methods return a new value"]
    pub fn idle_wait(mut self, idle_wait: Duration) -> Self {
        self.idle_wait = idle_wait;
        self
    }

    /// Build the Logger; the consumer thread starts immediately, with the
    /// configured sinks already registered.
    pub fn build(self) -> Logger {
        Logger::start(self.name, self.sinks, self.idle_wait)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    ///
    /// ```
    /// use pipelog::Logger;
    ///
    /// let logger = Logger::builder().name("app").build();
    /// assert!(logger.is_running());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
