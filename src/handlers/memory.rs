//! In-memory handler
//!
//! Captures rendered lines and the records they came from instead of
//! writing them anywhere, for tests and programmatic inspection.

use crate::core::{Formatter, Handler, LevelRegistry, LogRecord, Result, TemplateFormatter};
use parking_lot::Mutex;
use std::sync::Arc;

/// A handler that keeps everything it receives in memory
///
/// # Example
///
/// ```
/// use rust_logged::{DispatchMode, Logging, MemoryHandler, TRACE};
/// use std::sync::Arc;
///
/// let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
/// let capture = Arc::new(MemoryHandler::with_template(TRACE, "{message}"));
/// logging.add_handler(capture.clone());
///
/// logging.info("captured").unwrap();
/// assert!(capture.contains("captured"));
/// ```
pub struct MemoryHandler {
    threshold: i32,
    formatter: Arc<dyn Formatter>,
    entries: Mutex<Vec<(String, LogRecord)>>,
}

impl MemoryHandler {
    pub fn new(threshold: i32) -> Self {
        Self::with_formatter(threshold, Arc::new(TemplateFormatter::default()))
    }

    pub fn with_formatter(threshold: i32, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            threshold,
            formatter,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_template(threshold: i32, template: &str) -> Self {
        Self::with_formatter(threshold, Arc::new(TemplateFormatter::with_template(template)))
    }

    /// Rendered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(line, _)| line.clone()).collect()
    }

    /// Received records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.entries.lock().iter().map(|(_, record)| record.clone()).collect()
    }

    /// Take all captured lines, leaving the handler empty
    pub fn drain_lines(&self) -> Vec<String> {
        self.entries.lock().drain(..).map(|(line, _)| line).collect()
    }

    /// Whether any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|(line, _)| line.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn threshold(&self) -> i32 {
        self.threshold
    }

    fn handle(&self, record: &LogRecord, levels: &LevelRegistry) -> Result<()> {
        if !self.accepts(record.level) {
            return Ok(());
        }
        let line = self.formatter.format(record, levels);
        self.entries.lock().push((line, record.clone()));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        Some(Arc::clone(&self.formatter))
    }
}
