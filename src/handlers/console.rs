//! Console handler implementation

use crate::core::{
    Formatter, Handler, LevelRegistry, LogRecord, Result, TemplateFormatter, DEBUG, ERROR, INFO,
    WARN,
};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Output channel a record is written to, chosen by severity band
///
/// The bands are fixed: below `DEBUG` is trace, below `INFO` debug, below
/// `WARN` info, below `ERROR` warn, everything else error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleChannel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleChannel {
    pub fn for_level(level: i32) -> Self {
        if level < DEBUG {
            ConsoleChannel::Trace
        } else if level < INFO {
            ConsoleChannel::Debug
        } else if level < WARN {
            ConsoleChannel::Info
        } else if level < ERROR {
            ConsoleChannel::Warn
        } else {
            ConsoleChannel::Error
        }
    }

    /// Warn and error channels go to stderr, the rest to stdout
    pub fn is_stderr(&self) -> bool {
        matches!(self, ConsoleChannel::Warn | ConsoleChannel::Error)
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            ConsoleChannel::Trace => BrightBlack,
            ConsoleChannel::Debug => Blue,
            ConsoleChannel::Info => Green,
            ConsoleChannel::Warn => Yellow,
            ConsoleChannel::Error => Red,
        }
    }
}

/// Reference handler writing formatted records to the terminal
///
/// # Example
///
/// ```
/// use rust_logged::handlers::ConsoleHandler;
/// use rust_logged::WARN;
///
/// let handler = ConsoleHandler::new()
///     .with_threshold(WARN)
///     .with_template("{level:5} {name}: {message}", "%i")
///     .with_colors(false);
/// ```
pub struct ConsoleHandler {
    threshold: i32,
    formatter: Arc<dyn Formatter>,
    use_colors: bool,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            threshold: INFO,
            formatter: Arc::new(TemplateFormatter::default()),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Use a template formatter with the given template and date format
    #[must_use]
    pub fn with_template(self, template: &str, date_format: &str) -> Self {
        self.with_formatter(Arc::new(TemplateFormatter::new(template, date_format)))
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// The line this handler writes for `record`
    pub fn render(&self, record: &LogRecord, levels: &LevelRegistry) -> String {
        let line = self.formatter.format(record, levels);
        if self.use_colors {
            line.color(ConsoleChannel::for_level(record.level).color()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn threshold(&self) -> i32 {
        self.threshold
    }

    fn handle(&self, record: &LogRecord, levels: &LevelRegistry) -> Result<()> {
        if !self.accepts(record.level) {
            return Ok(());
        }

        let line = self.render(record, levels);
        if ConsoleChannel::for_level(record.level).is_stderr() {
            writeln!(std::io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        Some(Arc::clone(&self.formatter))
    }
}
