//! Handler trait for log output destinations

use super::{error::Result, formatter::Formatter, log_level::LevelRegistry, log_record::LogRecord};
use std::sync::Arc;

/// A severity-filtered sink that renders and emits records
///
/// Handlers are shared (`Arc<dyn Handler>`) between loggers and the
/// dispatcher, so any state they keep needs interior mutability.
pub trait Handler: Send + Sync {
    /// Minimum severity this handler accepts
    fn threshold(&self) -> i32;

    fn handle(&self, record: &LogRecord, levels: &LevelRegistry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Formatter used to render records, if the handler renders text
    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        None
    }

    fn accepts(&self, level: i32) -> bool {
        self.threshold() <= level
    }
}
