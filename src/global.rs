//! Process-wide default logging context
//!
//! Code that cannot thread a [`Logging`] value through its call graph can use
//! the module-level functions here. The default context is created on first
//! use and can be replaced with [`set_global`].
//!
//! The default context dispatches [`DispatchMode::Inline`]. It lives in a
//! static that is never dropped, so a background worker would still hold
//! queued records when the process exits. Contexts installed with
//! [`set_global`] keep whatever mode they were built with; call [`flush`]
//! before exit when that mode is background.
//!
//! # Examples
//!
//! ```
//! use rust_logged::global;
//! use rust_logged::prelude::*;
//! use std::sync::Arc;
//!
//! let capture = Arc::new(MemoryHandler::with_template(INFO, "{name}: {message}"));
//! let logging = Logging::builder()
//!     .dispatch_mode(DispatchMode::Inline)
//!     .build();
//! logging.add_handler(capture.clone());
//! global::set_global(logging);
//!
//! global::get_logger("app.db").info("connected").unwrap();
//! assert_eq!(capture.lines(), vec!["root: connected"]);
//! ```

use crate::core::{
    DispatchMode, Level, LevelEntry, LogArgs, Logger, Logging, RecordDraft, Result,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static GLOBAL: Lazy<RwLock<Arc<Logging>>> =
    Lazy::new(|| RwLock::new(Arc::new(default_context())));

fn default_context() -> Logging {
    Logging::builder()
        .dispatch_mode(DispatchMode::Inline)
        .build()
}

/// The current default context
pub fn global() -> Arc<Logging> {
    Arc::clone(&GLOBAL.read())
}

/// Replace the default context, returning the one it replaces
///
/// Loggers obtained from the previous context keep working against it.
pub fn set_global(logging: Logging) -> Arc<Logging> {
    std::mem::replace(&mut *GLOBAL.write(), Arc::new(logging))
}

/// Replace the default context with a freshly configured inline one
pub fn reset_global() -> Arc<Logging> {
    set_global(default_context())
}

pub fn get_logger(name: &str) -> Arc<Logger> {
    global().get_logger(name)
}

pub fn add_level(name: &str, severity: i32) {
    global().add_level(name, severity);
}

pub fn get_level(level: impl Into<Level>) -> Result<LevelEntry> {
    global().get_level(level)
}

pub fn log(draft: RecordDraft) -> Result<()> {
    global().log(draft)
}

pub fn log_at(level: impl Into<Level>, args: impl Into<LogArgs>) -> Result<()> {
    global().log_at(level, args)
}

pub fn trace(args: impl Into<LogArgs>) -> Result<()> {
    global().trace(args)
}

pub fn debug(args: impl Into<LogArgs>) -> Result<()> {
    global().debug(args)
}

pub fn info(args: impl Into<LogArgs>) -> Result<()> {
    global().info(args)
}

pub fn warn(args: impl Into<LogArgs>) -> Result<()> {
    global().warn(args)
}

pub fn error(args: impl Into<LogArgs>) -> Result<()> {
    global().error(args)
}

pub fn fatal(args: impl Into<LogArgs>) -> Result<()> {
    global().fatal(args)
}

/// Drain and flush the default context
pub fn flush() -> Result<()> {
    global().flush()
}
