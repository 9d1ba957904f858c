//! Multi-producer example
//!
//! Demonstrates several threads emitting through one logger while the single
//! consumer keeps the file output in enqueue order.
//!
//! Run with: cargo run --example multi_producer

use pipelog::prelude::*;
use std::thread;

fn main() -> Result<()> {
    println!("=== Pipelog - Multi Producer Example ===\n");

    let config = FileSinkConfig::new()
        .with_directory("demo_logs")
        .with_prefix("workers");
    let sink = FileSink::with_config(config)?;
    let mut logger = Logger::builder().name("workers").sink(sink).build();

    println!("1. Five producer threads, twenty records each:");
    thread::scope(|scope| {
        for thread_id in 0..5 {
            let logger = &logger;
            scope.spawn(move || {
                for i in 0..20 {
                    pipelog::info!(logger, "Thread {} - Message {}", thread_id, i);
                }
            });
        }
    });
    println!("   Producers finished without waiting on file I/O");

    logger.stop();

    println!("\n2. Delivery counters after stop:");
    let metrics = logger.metrics();
    println!("   enqueued:    {}", metrics.enqueued());
    println!("   dispatched:  {}", metrics.dispatched());
    println!("   sink errors: {}", metrics.sink_errors());

    println!("\n=== Example completed successfully! ===");
    println!("Check the 'demo_logs' directory for the ordered output");

    Ok(())
}
