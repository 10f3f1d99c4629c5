//! Stress tests for concurrent use of one logging context
//!
//! These tests verify:
//! - Concurrent `get_logger` calls converge on a single tree
//! - Background dispatch delivers every record under load
//! - A failing handler does not starve its neighbours
//! - Levels can be registered while other threads log

use rust_logged::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

struct Flaky {
    calls: AtomicUsize,
}

impl Handler for Flaky {
    fn threshold(&self) -> i32 {
        TRACE
    }

    fn handle(&self, _record: &LogRecord, _levels: &LevelRegistry) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            return Err(LoggerError::handler("flaky", "every other call fails"));
        }
        panic!("flaky handler panicked");
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[test]
fn test_concurrent_tree_growth() {
    let logging = Arc::new(
        Logging::builder()
            .dispatch_mode(DispatchMode::Inline)
            .build(),
    );
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let logging = Arc::clone(&logging);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..50)
                    .map(|i| logging.get_logger(&format!("svc.shard{}.conn", i % 10)))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Arc<Logger>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for loggers in &results[1..] {
        for (a, b) in loggers.iter().zip(&results[0]) {
            assert!(Arc::ptr_eq(a, b));
        }
    }
    assert_eq!(logging.get_logger("svc").children().len(), 10);
}

#[test]
fn test_high_volume_background_dispatch() {
    let logging = Arc::new(Logging::builder().build());
    let root_capture = Arc::new(MemoryHandler::with_template(TRACE, "{message}"));
    let leaf_capture = Arc::new(MemoryHandler::with_template(INFO, "{message}"));
    logging.add_handler(root_capture.clone());
    logging.get_logger("load").add_handler(leaf_capture.clone());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logging = Arc::clone(&logging);
            thread::spawn(move || {
                let logger = logging.get_logger(&format!("load.t{}", t));
                for i in 0..1_000 {
                    if i % 2 == 0 {
                        logger.debug(format!("{}:{}", t, i)).unwrap();
                    } else {
                        logger.info(format!("{}:{}", t, i)).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logging.flush().unwrap();

    assert_eq!(root_capture.len(), 8_000);
    assert_eq!(leaf_capture.len(), 4_000);
    assert_eq!(logging.metrics().filtered_out(), 4_000);

    // Per-thread order survives the shared queue.
    let lines = root_capture.lines();
    for t in 0..8 {
        let prefix = format!("{}:", t);
        let seen: Vec<usize> = lines
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix))
            .map(|i| i.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..1_000).collect::<Vec<_>>());
    }
}

#[test]
fn test_failing_handler_is_isolated() {
    let logging = Logging::builder().build();
    let good = Arc::new(MemoryHandler::with_template(TRACE, "{message}"));
    logging.add_handler(Arc::new(Flaky {
        calls: AtomicUsize::new(0),
    }));
    logging.add_handler(good.clone());

    for i in 0..200 {
        logging.info(format!("{}", i)).unwrap();
    }
    logging.flush().unwrap();

    assert_eq!(good.len(), 200);
    assert_eq!(logging.metrics().handler_failures(), 200);
}

#[test]
fn test_level_registration_during_logging() {
    let logging = Arc::new(
        Logging::builder()
            .dispatch_mode(DispatchMode::Inline)
            .build(),
    );
    let capture = Arc::new(MemoryHandler::new(TRACE));
    logging.add_handler(capture.clone());

    let writer = {
        let logging = Arc::clone(&logging);
        thread::spawn(move || {
            for i in 0..100 {
                logging.add_level(&format!("custom{}", i), 100 + i);
            }
        })
    };
    let reader = {
        let logging = Arc::clone(&logging);
        thread::spawn(move || {
            for i in 0..500 {
                logging.get_logger("reader").info(format!("{}", i)).unwrap();
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(capture.len(), 500);
    assert_eq!(logging.levels().len(), 106);
    assert_eq!(logging.level_name(199), "CUSTOM99");
}
