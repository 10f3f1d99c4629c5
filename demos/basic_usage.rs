//! Basic logging usage example
//!
//! Demonstrates the logger hierarchy, custom levels, templates and the
//! module-level default context.
//!
//! Run with: cargo run --example basic_usage

use rust_logged::prelude::*;
use rust_logged::{global, info, warn};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Logged - Basic Usage Example ===\n");

    let logging = Logging::builder()
        .dispatch_mode(DispatchMode::Background)
        .root_level(TRACE)
        .build();
    logging.add_handler(Arc::new(ConsoleHandler::new().with_threshold(TRACE)));

    println!("1. Logging at different levels:");
    let app = logging.get_logger("app");
    app.trace("This is a trace message")?;
    app.debug("This is a debug message")?;
    app.info("This is an info message")?;
    app.warn("This is a warning message")?;
    app.error("This is an error message")?;
    app.fatal("This is a fatal message")?;
    logging.flush()?;

    println!("\n2. Child loggers with their own handlers:");
    let db = logging.get_logger("app.db");
    db.add_handler(Arc::new(
        ConsoleHandler::new()
            .with_threshold(WARN)
            .with_template("  db> {level:5} {message} {args:?}", "%H:%M:%S"),
    ));
    db.info("connected (root only)")?;
    db.warn(("slow query", json!({"ms": 812})))?;
    logging.flush()?;

    println!("\n3. Structured payloads and custom levels:");
    logging.add_level("notice", 25);
    db.log_at(
        "notice",
        json!({"message": "pool resized", "size": 16, "createdAt": "2024-01-01T00:00:00Z"}),
    )?;
    info!(db, "{} connections idle", 3)?;
    logging.flush()?;

    println!("\n4. Module-level default context:");
    // Stock context: nothing configured, the root installs the default
    // console handler and output is written before the call returns.
    global::get_logger("worker").info("started")?;
    warn!(global::get_logger("worker"), "queue depth {}", 120)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
