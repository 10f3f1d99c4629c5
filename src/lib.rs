//! # Rust Logged
//!
//! A hierarchical logging façade: dotted logger names form a tree, records
//! propagate from the emitting logger up to the root, and every logger's
//! handlers filter by severity before formatting and writing.
//!
//! ## Features
//!
//! - **Logger Hierarchy**: `a.b.c` loggers created on demand, with per-logger
//!   default levels, handlers and record builders
//! - **Runtime Levels**: six built-in levels plus any number registered later
//! - **Template Formatting**: `{path:options}` placeholders with padding,
//!   width and decimal alignment
//! - **Background Dispatch**: handlers run on a worker thread, in order
//! - **Registries**: named handler, formatter and builder factories
//!
//! ## Quick Start
//!
//! ```
//! use rust_logged::prelude::*;
//! use std::sync::Arc;
//!
//! let logging = Logging::builder()
//!     .dispatch_mode(DispatchMode::Inline)
//!     .build();
//! let capture = Arc::new(MemoryHandler::with_template(INFO, "{level} {message}"));
//! logging.add_handler(capture.clone());
//!
//! let db = logging.get_logger("app.db");
//! db.info("connected")?;
//! db.debug("not shown")?;
//!
//! assert_eq!(capture.lines(), vec!["INFO connected"]);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Builder, DispatchMode, Formatter, Handler, Level, LevelRegistry, LogArg, LogArgs,
        LogRecord, Logger, LoggerError, Logging, LoggingBuilder, RecordDraft, Result, RootNaming,
        SimpleBuilder, TemplateFormatter, DEBUG, ERROR, FATAL, INFO, TRACE, WARN,
    };
    pub use crate::handlers::{ConsoleHandler, MemoryHandler};
}

pub use crate::core::{
    iso8601, value_to_text, Builder, BuilderRegistry, ComponentRegistry, DateFormat, DispatchMode,
    Dispatcher, Factory, FieldOptions, Formatter, FormatterRegistry, Handler, HandlerRegistry,
    Level, LevelEntry, LevelRegistry, LogArg, LogArgs, LogRecord, Logger, LoggerError,
    LoggerMetrics, Logging, LoggingBuilder, RecordDraft, Result, RootNaming, SimpleBuilder,
    TemplateFormatter, BOOTSTRAP_NAME, BUILTIN_LEVELS, DEBUG, DEFAULT_SHUTDOWN_TIMEOUT,
    DEFAULT_TEMPLATE, ERROR, FATAL, INFO, LOGGER_SEPARATOR, ROOT_NAME, TRACE, WARN,
};
pub use crate::handlers::{ConsoleChannel, ConsoleHandler, MemoryHandler};
