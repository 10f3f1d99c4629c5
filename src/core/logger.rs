//! Logger hierarchy and record propagation

use super::{
    error::Result,
    handler::Handler,
    log_level::Level,
    log_record::{LogRecord, RecordDraft},
    logging::{RootNaming, Shared},
    record_builder::{Builder, LogArgs},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Weak};

/// Name the root logger reports
pub const ROOT_NAME: &str = "root";

/// Separator between name segments of a dotted logger path
pub const LOGGER_SEPARATOR: char = '.';

/// A named node of the logger tree
///
/// Loggers are created through [`Logger::get_child`] (or
/// [`Logging::get_logger`](crate::Logging::get_logger)) and live as long as
/// their parent: a parent owns its children, a child only keeps a weak
/// link back to its parent. The parent is fixed at creation, so a
/// logger's dotted name is derived from the tree on every access.
///
/// # Example
///
/// ```
/// use rust_logged::{DispatchMode, Logging, MemoryHandler, WARN};
/// use std::sync::Arc;
///
/// let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// let capture = Arc::new(MemoryHandler::with_template(WARN, "{name} {level} {message}"));
///
/// let db = logging.get_logger("svc.db");
/// db.add_handler(capture.clone());
///
/// db.info("connected").unwrap();
/// db.warn("slow query").unwrap();
///
/// assert_eq!(capture.lines(), vec!["svc.db WARN slow query"]);
/// ```
pub struct Logger {
    segment: String,
    parent: Option<Weak<Logger>>,
    this: Weak<Logger>,
    children: RwLock<HashMap<String, Arc<Logger>>>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    default_level: AtomicI32,
    propagate: AtomicBool,
    builder: RwLock<Arc<dyn Builder>>,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn new_root(shared: Arc<Shared>, default_level: i32, builder: Arc<dyn Builder>) -> Arc<Self> {
        Self::create(ROOT_NAME.to_string(), None, shared, default_level, builder)
    }

    fn create(
        segment: String,
        parent: Option<Weak<Logger>>,
        shared: Arc<Shared>,
        default_level: i32,
        builder: Arc<dyn Builder>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            segment,
            parent,
            this: this.clone(),
            children: RwLock::new(HashMap::new()),
            handlers: RwLock::new(Vec::new()),
            default_level: AtomicI32::new(default_level),
            propagate: AtomicBool::new(true),
            builder: RwLock::new(builder),
            shared,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Own name segment, without ancestors
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Full dotted name; the root's own segment never appears in it
    pub fn name(&self) -> String {
        if self.is_root() {
            return ROOT_NAME.to_string();
        }

        let mut segments = vec![self.segment.clone()];
        let mut next = self.parent();
        while let Some(logger) = next {
            if logger.is_root() {
                break;
            }
            segments.push(logger.segment.clone());
            next = logger.parent();
        }
        segments.reverse();
        segments.join(&LOGGER_SEPARATOR.to_string())
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Child logger for `segment`, created on first request
    ///
    /// New children inherit this logger's default severity and builder.
    pub fn get_child(&self, segment: &str) -> Arc<Logger> {
        if let Some(child) = self.children.read().get(segment) {
            return Arc::clone(child);
        }

        let mut children = self.children.write();
        let child = children.entry(segment.to_string()).or_insert_with(|| {
            Self::create(
                segment.to_string(),
                Some(self.this.clone()),
                Arc::clone(&self.shared),
                self.default_level(),
                self.builder(),
            )
        });
        Arc::clone(child)
    }

    pub fn children(&self) -> Vec<Arc<Logger>> {
        let mut children: Vec<Arc<Logger>> = self.children.read().values().cloned().collect();
        children.sort_by(|a, b| a.segment.cmp(&b.segment));
        children
    }

    /// Attach a handler; the same handler may be attached more than once
    pub fn add_handler(&self, handler: Arc<dyn Handler>) -> &Self {
        self.handlers.write().push(handler);
        self
    }

    pub fn handlers(&self) -> Vec<Arc<dyn Handler>> {
        self.handlers.read().clone()
    }

    pub fn default_level(&self) -> i32 {
        self.default_level.load(Ordering::Relaxed)
    }

    pub fn set_default_level(&self, level: i32) -> &Self {
        self.default_level.store(level, Ordering::Relaxed);
        self
    }

    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) -> &Self {
        self.propagate.store(propagate, Ordering::Relaxed);
        self
    }

    pub fn builder(&self) -> Arc<dyn Builder> {
        Arc::clone(&self.builder.read())
    }

    pub fn set_builder(&self, builder: Arc<dyn Builder>) -> &Self {
        *self.builder.write() = builder;
        self
    }

    /// Build a record from `args` and emit it at `level`
    ///
    /// `level` is a registered name or a raw severity; the call's level
    /// takes precedence over any level supplied in the payload.
    pub fn log_at(&self, level: impl Into<Level>, args: impl Into<LogArgs>) -> Result<()> {
        let severity = self.shared.levels.resolve(&level.into())?;
        let draft = self.builder().build(args.into())?;
        self.log(draft.with_level(severity))
    }

    /// Emit a partial record
    ///
    /// Level and name default to this logger's default severity and dotted
    /// name. The finalized record is delivered to this logger's handlers
    /// and, while propagation is enabled, unchanged to each ancestor.
    pub fn log(&self, draft: RecordDraft) -> Result<()> {
        let record = Arc::new(draft.finalize(self.default_level(), &self.name())?);
        self.shared.metrics.record_emitted();

        let mut outcome = self.deliver(&record);
        if !self.propagate() {
            return outcome;
        }

        let mut next = self.parent();
        while let Some(logger) = next {
            keep_first_error(&mut outcome, logger.deliver(&record));
            if !logger.propagate() {
                break;
            }
            next = logger.parent();
        }
        outcome
    }

    level_methods! {
        /// Log at `TRACE`
        trace => "TRACE",
        /// Log at `DEBUG`
        debug => "DEBUG",
        /// Log at `INFO`
        info => "INFO",
        /// Log at `WARN`
        warn => "WARN",
        /// Log at `ERROR`
        error => "ERROR",
        /// Log at `FATAL`
        fatal => "FATAL",
    }

    /// Schedule `record` on every attached handler whose threshold admits it
    ///
    /// A failing handler does not keep the record from the handlers after
    /// it; the first error is returned once all of them have been served.
    fn deliver(&self, record: &Arc<LogRecord>) -> Result<()> {
        let mut outcome = Ok(());
        let record = if self.is_root() {
            keep_first_error(&mut outcome, self.ensure_fallback_handler());
            match self.shared.root_naming {
                RootNaming::Own if record.name != ROOT_NAME => Arc::new(record.renamed(ROOT_NAME)),
                _ => Arc::clone(record),
            }
        } else {
            Arc::clone(record)
        };

        for handler in self.handlers() {
            if handler.accepts(record.level) {
                keep_first_error(
                    &mut outcome,
                    self.shared.dispatcher.dispatch(handler, Arc::clone(&record)),
                );
            } else {
                self.shared.metrics.record_filtered();
            }
        }
        outcome
    }

    /// Attach the default handler when a record reaches a handler-less root
    fn ensure_fallback_handler(&self) -> Result<()> {
        if !self.handlers.read().is_empty() {
            return Ok(());
        }

        let handler = {
            let mut handlers = self.handlers.write();
            if !handlers.is_empty() {
                return Ok(());
            }
            let handler = self.shared.handlers.default_instance();
            handlers.push(Arc::clone(&handler));
            handler
        };

        self.shared.metrics.record_fallback();
        self.shared.bootstrap_notice(handler, "implicitly added default handler to root")
    }

    /// Visit this logger and all its descendants, depth first
    pub(crate) fn walk(&self, visit: &mut dyn FnMut(&Logger)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

fn keep_first_error(outcome: &mut Result<()>, result: Result<()>) {
    if outcome.is_ok() {
        *outcome = result;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("default_level", &self.default_level())
            .field("propagate", &self.propagate())
            .field("handlers", &self.handlers.read().len())
            .field("children", &self.children.read().len())
            .finish()
    }
}
