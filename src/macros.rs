//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and log the result
//! through any [`Logger`](crate::Logger) or [`Logging`](crate::Logging).
//! They evaluate to the `Result` of the logging call.
//!
//! # Examples
//!
//! ```
//! use rust_logged::prelude::*;
//! use rust_logged::info;
//!
//! let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
//! let logger = logging.get_logger("server");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a formatted message at a level given by name or severity.
///
/// # Examples
///
/// ```
/// # use rust_logged::prelude::*;
/// # let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// # let logger = logging.get_logger("app");
/// use rust_logged::log;
/// log!(logger, "INFO", "Simple message").unwrap();
/// log!(logger, ERROR, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+))
    };
}

/// Collect heterogeneous call arguments into [`LogArgs`](crate::LogArgs).
///
/// # Examples
///
/// ```
/// use rust_logged::log_args;
/// use serde_json::json;
///
/// let args = log_args!("copied {} files", 3, json!({"dest": "/tmp"}));
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! log_args {
    ($($arg:expr),* $(,)?) => {
        $crate::LogArgs::new()$(.arg($arg))*
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_logged::prelude::*;
/// # let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// # let logger = logging.get_logger("app");
/// use rust_logged::trace;
/// trace!(logger, "Entering function: calculate()").unwrap();
/// trace!(logger, "Variable value: {}", 42).unwrap();
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "TRACE", $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "DEBUG", $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_logged::prelude::*;
/// # let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// use rust_logged::info;
/// info!(logging, "Application started").unwrap();
/// info!(logging, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "INFO", $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "WARN", $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "ERROR", $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_logged::prelude::*;
/// # let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// # let logger = logging.get_logger("app");
/// use rust_logged::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "FATAL", $($arg)+)
    };
}
