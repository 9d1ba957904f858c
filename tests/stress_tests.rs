//! Stress tests for the asynchronous pipeline
//!
//! These tests verify:
//! - No record is lost under high volume
//! - stop and drop drain everything without producer-side sleeps
//! - Order survives many concurrent producers
//! - Rotation under load never drops lines

use pipelog::{FileSink, FileSinkConfig, LogLevel, Logger};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn file_sink(dir: &std::path::Path) -> FileSink {
    let config = FileSinkConfig::new().with_directory(dir);
    FileSink::with_config(config).expect("Failed to create sink")
}

fn read_all_lines(dir: &std::path::Path) -> Vec<String> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .expect("Failed to read log dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .collect();
    files.sort();

    let mut lines = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(&file).expect("Failed to read log file");
        lines.extend(content.lines().map(|line| line.to_string()));
    }
    lines
}

/// Test that stop delivers a large backlog without any producer-side sleep
#[test]
fn test_high_volume_single_producer() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::builder()
        .name("volume-test")
        .sink(file_sink(temp_dir.path()))
        .build();

    for i in 0..10_000 {
        logger.info(format!("Message {}", i));
    }
    logger.stop();

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 10_000, "Every enqueued record must be written");
    for (i, line) in lines.iter().enumerate() {
        assert!(
            line.ends_with(&format!("Message {}", i)),
            "Line {} out of order: {}",
            i,
            line
        );
    }
    assert_eq!(logger.metrics().dispatched(), 10_000);
}

/// Test that dropping the logger drains the backlog just like stop
#[test]
fn test_drop_drains_backlog() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    {
        let mut logger = Logger::builder()
            .name("drop-test")
            .sink(file_sink(temp_dir.path()))
            .build();

        for i in 0..2_000 {
            logger.debug(format!("Message {}", i));
        }
        // Logger drops here without an explicit stop.
    }

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 2_000, "Drop must flush the backlog before returning");
}

/// Test that many concurrent producers lose nothing and keep per-thread order
#[test]
fn test_many_producers_no_loss() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::builder()
            .name("producers-test")
            .sink(file_sink(temp_dir.path()))
            .build(),
    );

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger_clone = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            for i in 0..500 {
                logger_clone.info(format!("T{} Message {}", thread_id, i));
            }
        });
        handles.push(handle);
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    drop(logger);

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 4_000, "Expected 8 threads * 500 messages");

    for thread_id in 0..8 {
        let prefix = format!("T{} Message ", thread_id);
        let mine: Vec<&String> = lines
            .iter()
            .filter(|line| line.contains(&prefix))
            .collect();
        assert_eq!(mine.len(), 500, "Thread {} lost messages", thread_id);
        for (i, line) in mine.iter().enumerate() {
            assert!(
                line.ends_with(&format!("{}{}", prefix, i)),
                "Thread {} message {} out of order: {}",
                thread_id,
                i,
                line
            );
        }
    }
}

/// Stress test with rapid log bursts
#[test]
fn test_rapid_burst_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut logger = Logger::builder()
        .name("burst-test")
        .sink(file_sink(temp_dir.path()))
        .build();

    for burst in 0..10 {
        for i in 0..20 {
            logger.trace(format!("Burst {} trace {}", burst, i));
        }
        logger.fatal(format!("Burst {} complete", burst));
        std::thread::sleep(Duration::from_millis(10));
    }
    logger.stop();

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 210);
    let content = lines.join("\n");
    for burst in 0..10 {
        assert!(
            content.contains(&format!("Burst {} complete", burst)),
            "Burst {} completion marker missing!",
            burst
        );
    }
}

/// Test that rotation under sustained load never drops a line
#[test]
fn test_rotation_under_load_keeps_every_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileSinkConfig::new()
        .with_directory(temp_dir.path())
        .with_max_file_size(4096);
    let sink = FileSink::with_config(config).expect("Failed to create sink");

    let mut logger = Logger::builder().name("rotation-load").sink(sink).build();
    for i in 0..2_000 {
        logger.warn(format!("Message {}", i));
    }
    logger.stop();

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 2_000, "Rotation must never lose lines");
    assert_eq!(logger.metrics().sink_errors(), 0);
}

/// Test that a flood against a high threshold delivers exactly the admitted records
#[test]
fn test_threshold_under_flood() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileSinkConfig::new()
        .with_directory(temp_dir.path())
        .with_level(LogLevel::Warn);
    let sink = FileSink::with_config(config).expect("Failed to create sink");

    let mut logger = Logger::builder().name("flood-test").sink(sink).build();
    for i in 0..1_000 {
        logger.trace(format!("Noise {}", i));
        if i % 10 == 0 {
            logger.warn(format!("Signal {}", i / 10));
        }
    }
    logger.stop();

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), 100, "Only the admitted records should be written");
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("Signal {}", i)));
    }
    // Filtered records still count as dispatched; nothing is an error.
    assert_eq!(logger.metrics().dispatched(), 1_100);
    assert_eq!(logger.metrics().sink_errors(), 0);
}
