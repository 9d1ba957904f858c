//! Basic pipeline usage example
//!
//! Demonstrates emitting at every level through a file sink and reading the
//! delivery counters afterwards.
//!
//! Run with: cargo run --example basic_usage

use pipelog::prelude::*;

fn main() -> Result<()> {
    println!("=== Pipelog - Basic Usage Example ===\n");

    // One file sink that admits everything
    let sink = FileSink::with_config(FileSinkConfig::new().with_directory("demo_logs"))?;
    let mut logger = Logger::builder().name("demo").sink(sink).build();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");
    println!("   Emitted 6 records without blocking on file I/O");

    println!("\n2. Formatted logging through the macros:");
    pipelog::info!(logger, "Processing batch {} of {}", 1, 3);
    pipelog::warn!(logger, "Batch {} is {}% over budget", 2, 15);
    println!("   Emitted 2 records with call-site locations");

    // Stop drains the queue before returning
    logger.stop();

    println!("\n3. Delivery counters:");
    let metrics = logger.metrics();
    println!("   enqueued:   {}", metrics.enqueued());
    println!("   dispatched: {}", metrics.dispatched());
    println!("   discarded:  {}", metrics.discarded());

    println!("\n=== Example completed successfully! ===");
    println!("Check the 'demo_logs' directory for the log file");

    Ok(())
}
