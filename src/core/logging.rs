//! The logging context: level registry, component registries, dispatcher
//! and the logger tree, bundled together
//!
//! A [`Logging`] value is constructed once by the process entry point and
//! handed to whatever needs loggers. [`crate::global`] keeps a lazily
//! created default instance for code that prefers module-level calls.

use super::{
    dispatch::{DispatchMode, Dispatcher},
    error::Result,
    formatter::{Formatter, TemplateFormatter},
    handler::Handler,
    log_level::{Level, LevelEntry, LevelRegistry, INFO, WARN},
    log_record::RecordDraft,
    logger::{Logger, LOGGER_SEPARATOR, ROOT_NAME},
    metrics::LoggerMetrics,
    record_builder::{Builder, LogArgs, SimpleBuilder},
    registry::{BuilderRegistry, FormatterRegistry, HandlerRegistry},
};
use crate::handlers::ConsoleHandler;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name carried by records the logging system emits about itself
pub const BOOTSTRAP_NAME: &str = "logged";

/// Which name the root logger's handlers see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootNaming {
    /// The root reports its own name, `root`
    #[default]
    Own,

    /// The root keeps the name of the logger the record originated from
    Origin,
}

/// State shared by every logger of one context
pub(crate) struct Shared {
    pub(crate) levels: LevelRegistry,
    pub(crate) handlers: HandlerRegistry,
    pub(crate) formatters: FormatterRegistry,
    pub(crate) builders: BuilderRegistry,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) metrics: Arc<LoggerMetrics>,
    pub(crate) root_naming: RootNaming,
    bootstrap_noticed: AtomicBool,
}

impl Shared {
    /// Deliver an internal notice straight to `handler`, outside the logger tree
    ///
    /// Emitted at most once per context.
    pub(crate) fn bootstrap_notice(&self, handler: Arc<dyn Handler>, message: &str) -> Result<()> {
        if self.bootstrap_noticed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let level = self.levels.level_number("WARN").unwrap_or(WARN);
        if !handler.accepts(level) {
            return Ok(());
        }

        let mut fields = Map::new();
        fields.insert("args".to_string(), Value::Array(Vec::new()));
        let record = RecordDraft {
            fields,
            ..RecordDraft::new(message)
        }
        .with_level(level)
        .with_name(BOOTSTRAP_NAME)
        .finalize(level, BOOTSTRAP_NAME)?;

        self.dispatcher.dispatch(handler, Arc::new(record))
    }
}

/// A complete logging context
///
/// # Example
///
/// ```
/// use rust_logged::{Logging, MemoryHandler, DispatchMode, INFO};
/// use std::sync::Arc;
///
/// let logging = Logging::builder()
///     .dispatch_mode(DispatchMode::Inline)
///     .build();
///
/// let capture = Arc::new(MemoryHandler::with_template(INFO, "{level} {name}: {message}"));
/// logging.add_handler(capture.clone());
///
/// logging.add_level("notice", 25);
/// logging.get_logger("app.http").log_at("notice", "listening").unwrap();
///
/// assert_eq!(capture.lines(), vec!["NOTICE root: listening"]);
/// ```
pub struct Logging {
    shared: Arc<Shared>,
    root: Arc<Logger>,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggingBuilder {
        LoggingBuilder::new()
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Logger for a dotted path, creating missing loggers along the way
    ///
    /// `"root"` and `""` name the root; empty segments are skipped.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name == ROOT_NAME {
            return self.root();
        }
        name.split(LOGGER_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .fold(self.root(), |logger, segment| logger.get_child(segment))
    }

    /// Register a level, or overwrite an existing level's severity
    pub fn add_level(&self, name: &str, severity: i32) {
        self.shared.levels.add_level(name, severity);
    }

    /// Look up a level by name or by severity
    pub fn get_level(&self, level: impl Into<Level>) -> Result<LevelEntry> {
        self.shared.levels.get_level(&level.into())
    }

    pub fn level_name(&self, severity: i32) -> String {
        self.shared.levels.level_name(severity)
    }

    pub fn level_number(&self, name: &str) -> Result<i32> {
        self.shared.levels.level_number(name)
    }

    pub fn levels(&self) -> Vec<LevelEntry> {
        self.shared.levels.levels()
    }

    pub fn level_registry(&self) -> &LevelRegistry {
        &self.shared.levels
    }

    pub fn handler_registry(&self) -> &HandlerRegistry {
        &self.shared.handlers
    }

    pub fn formatter_registry(&self) -> &FormatterRegistry {
        &self.shared.formatters
    }

    pub fn builder_registry(&self) -> &BuilderRegistry {
        &self.shared.builders
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        self.shared.dispatcher.mode()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Attach a handler to the root logger
    pub fn add_handler(&self, handler: Arc<dyn Handler>) -> &Self {
        self.root.add_handler(handler);
        self
    }

    /// Emit a partial record through the root logger
    pub fn log(&self, draft: RecordDraft) -> Result<()> {
        self.root.log(draft)
    }

    pub fn log_at(&self, level: impl Into<Level>, args: impl Into<LogArgs>) -> Result<()> {
        self.root.log_at(level, args)
    }

    level_methods! {
        /// Log at `TRACE` through the root logger
        trace => "TRACE",
        /// Log at `DEBUG` through the root logger
        debug => "DEBUG",
        /// Log at `INFO` through the root logger
        info => "INFO",
        /// Log at `WARN` through the root logger
        warn => "WARN",
        /// Log at `ERROR` through the root logger
        error => "ERROR",
        /// Log at `FATAL` through the root logger
        fatal => "FATAL",
    }

    /// Wait for scheduled handler invocations, then flush every handler in the tree
    pub fn flush(&self) -> Result<()> {
        self.shared.dispatcher.drain()?;

        let mut handlers: Vec<Arc<dyn Handler>> = Vec::new();
        self.root.walk(&mut |logger| handlers.extend(logger.handlers()));
        for handler in handlers {
            handler.flush()?;
        }
        Ok(())
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logging")
            .field("root", &self.root)
            .field("dispatch_mode", &self.dispatch_mode())
            .field("root_naming", &self.shared.root_naming)
            .finish()
    }
}

/// Builder for constructing a [`Logging`] context with a fluent API
///
/// # Example
/// ```
/// use rust_logged::prelude::*;
/// use std::sync::Arc;
///
/// let logging = Logging::builder()
///     .dispatch_mode(DispatchMode::Background)
///     .root_level(DEBUG)
///     .root_naming(RootNaming::Origin)
///     .handler(ConsoleHandler::new().with_threshold(DEBUG))
///     .build();
///
/// logging.get_logger("app").debug("started").unwrap();
/// logging.flush().unwrap();
/// ```
pub struct LoggingBuilder {
    dispatch_mode: DispatchMode,
    root_level: i32,
    root_naming: RootNaming,
    levels: Vec<(String, i32)>,
    builder: Option<Arc<dyn Builder>>,
    formatter: Option<Arc<dyn Formatter>>,
    default_handler: Option<Arc<dyn Handler>>,
    root_handlers: Vec<Arc<dyn Handler>>,
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self {
            dispatch_mode: DispatchMode::default(),
            root_level: INFO,
            root_naming: RootNaming::default(),
            levels: Vec::new(),
            builder: None,
            formatter: None,
            default_handler: None,
            root_handlers: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.dispatch_mode = mode;
        self
    }

    /// Default severity of the root logger, inherited by loggers created later
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: i32) -> Self {
        self.root_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_naming(mut self, naming: RootNaming) -> Self {
        self.root_naming = naming;
        self
    }

    /// Register an extra level next to the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, name: impl Into<String>, severity: i32) -> Self {
        self.levels.push((name.into(), severity));
        self
    }

    /// Default record builder, used by every logger unless replaced
    #[must_use = "builder methods return a new value"]
    pub fn record_builder<B: Builder + 'static>(mut self, builder: B) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    /// Default formatter, used by the default console handler
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Handler the root attaches when a record reaches it without handlers
    #[must_use = "builder methods return a new value"]
    pub fn default_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.default_handler = Some(handler);
        self
    }

    /// Attach a handler to the root logger
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.root_handlers.push(Arc::new(handler));
        self
    }

    pub fn build(self) -> Logging {
        let levels = LevelRegistry::new();
        for (name, severity) in &self.levels {
            levels.add_level(name, *severity);
        }

        let metrics = Arc::new(LoggerMetrics::new());
        let dispatcher = Dispatcher::new(self.dispatch_mode, levels.clone(), Arc::clone(&metrics));

        let formatters = FormatterRegistry::new(
            "formatter",
            self.formatter.unwrap_or_else(|| Arc::new(TemplateFormatter::default())),
        );
        formatters.add("TemplateFormatter", || Arc::new(TemplateFormatter::default()));

        let console_formatter = formatters.default_instance();
        let default_handler = self.default_handler.unwrap_or_else(|| {
            Arc::new(ConsoleHandler::new().with_formatter(Arc::clone(&console_formatter)))
        });
        let handlers = HandlerRegistry::new("handler", default_handler);
        handlers.add("ConsoleHandler", move || {
            Arc::new(ConsoleHandler::new().with_formatter(Arc::clone(&console_formatter)))
        });

        let builders = BuilderRegistry::new(
            "builder",
            self.builder.unwrap_or_else(|| Arc::new(SimpleBuilder)),
        );
        builders.add("SimpleBuilder", || Arc::new(SimpleBuilder));

        let shared = Arc::new(Shared {
            levels,
            handlers,
            formatters,
            builders,
            dispatcher,
            metrics,
            root_naming: self.root_naming,
            bootstrap_noticed: AtomicBool::new(false),
        });

        let root = Logger::new_root(
            Arc::clone(&shared),
            self.root_level,
            shared.builders.default_instance(),
        );
        for handler in self.root_handlers {
            root.add_handler(handler);
        }

        Logging { shared, root }
    }
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
