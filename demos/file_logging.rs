//! File sink configuration example
//!
//! Demonstrates directory, prefix, threshold, and size settings on the
//! rotating file sink.
//!
//! Run with: cargo run --example file_logging

use pipelog::prelude::*;

fn main() -> Result<()> {
    println!("=== Pipelog - File Logging Example ===\n");

    // Debug threshold: trace records are filtered at the sink
    let config = FileSinkConfig::new()
        .with_directory("demo_logs")
        .with_prefix("app")
        .with_level(LogLevel::Debug);
    let sink = FileSink::with_config(config)?;

    let mut logger = Logger::builder().name("app").sink(sink).build();

    println!("1. Simulating application activity:");
    logger.trace("Filtered by the sink threshold");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");

    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");
    logger.stop();
    println!("   Done; the trace record never reached the file");

    println!("\n2. Files produced under 'demo_logs':");
    for entry in std::fs::read_dir("demo_logs")? {
        let path = entry?.path();
        let size = std::fs::metadata(&path)?.len();
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            if name.starts_with("app_") {
                println!("   {} ({} bytes)", name, size);
            }
        }
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
