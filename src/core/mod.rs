//! Core logging types and traits

/// Per-level convenience calls for the built-in levels
///
/// Each method resolves its level by name at call time, so overwriting a
/// built-in level's severity is honoured. Levels registered at runtime are
/// reached through `log_at`.
macro_rules! level_methods {
    ($($(#[$doc:meta])* $method:ident => $level:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $method(&self, args: impl Into<LogArgs>) -> Result<()> {
                self.log_at($level, args)
            }
        )*
    };
}

pub mod dispatch;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod logging;
pub mod metrics;
pub mod record_builder;
pub mod registry;
pub mod timestamp;

pub use dispatch::{DispatchMode, Dispatcher, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{LoggerError, Result};
pub use formatter::{FieldOptions, Formatter, TemplateFormatter, DEFAULT_TEMPLATE};
pub use handler::Handler;
pub use log_level::{
    Level, LevelEntry, LevelRegistry, BUILTIN_LEVELS, DEBUG, ERROR, FATAL, INFO, TRACE, WARN,
};
pub use log_record::{value_to_text, LogRecord, RecordDraft};
pub use logger::{Logger, LOGGER_SEPARATOR, ROOT_NAME};
pub use logging::{Logging, LoggingBuilder, RootNaming, BOOTSTRAP_NAME};
pub use metrics::LoggerMetrics;
pub use record_builder::{Builder, LogArg, LogArgs, SimpleBuilder};
pub use registry::{BuilderRegistry, ComponentRegistry, Factory, FormatterRegistry, HandlerRegistry};
pub use timestamp::{iso8601, DateFormat};
