//! Log level definitions and the level registry

use super::error::{LoggerError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const TRACE: i32 = 5;
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARN: i32 = 30;
pub const ERROR: i32 = 40;
pub const FATAL: i32 = 50;

/// Built-in levels in registration order
pub const BUILTIN_LEVELS: [(&str, i32); 6] = [
    ("TRACE", TRACE),
    ("DEBUG", DEBUG),
    ("INFO", INFO),
    ("WARN", WARN),
    ("ERROR", ERROR),
    ("FATAL", FATAL),
];

/// A level reference as supplied by callers: either a registered name or a raw severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Name(String),
    Severity(i32),
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Level::Name(name.to_string())
    }
}

impl From<String> for Level {
    fn from(name: String) -> Self {
        Level::Name(name)
    }
}

impl From<i32> for Level {
    fn from(severity: i32) -> Self {
        Level::Severity(severity)
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i32>() {
            Ok(severity) => Level::Severity(severity),
            Err(_) => Level::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Name(name) => write!(f, "{}", name),
            Level::Severity(severity) => write!(f, "{}", severity),
        }
    }
}

/// A registered level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    pub severity: i32,
}

/// Mapping of level names to severities, shared by every logger of a context
///
/// Names are canonicalized to uppercase. Entries keep their registration
/// order so that reverse lookups resolve ties to the first registered name.
/// The registry is append-only: re-registering a name overwrites its
/// severity in place, nothing is ever removed.
///
/// Cloning is cheap and yields a handle to the same registry.
///
/// # Example
///
/// ```
/// use rust_logged::LevelRegistry;
///
/// let levels = LevelRegistry::new();
/// levels.add_level("notice", 25);
///
/// assert_eq!(levels.level_number("NOTICE").unwrap(), 25);
/// assert_eq!(levels.level_name(25), "NOTICE");
/// assert_eq!(levels.level_name(27), "Level(27)");
/// ```
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    entries: Arc<RwLock<Vec<LevelEntry>>>,
}

impl LevelRegistry {
    /// Create a registry holding the built-in levels
    pub fn new() -> Self {
        let registry = Self::empty();
        for (name, severity) in BUILTIN_LEVELS {
            registry.add_level(name, severity);
        }
        registry
    }

    /// Create a registry without any level
    pub fn empty() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a level, or overwrite the severity of an existing one
    pub fn add_level(&self, name: &str, severity: i32) {
        let name = name.trim().to_uppercase();
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.severity = severity,
            None => entries.push(LevelEntry { name, severity }),
        }
    }

    /// Reverse lookup; falls back to `Level(<n>)` for unregistered severities
    pub fn level_name(&self, severity: i32) -> String {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.severity == severity)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| format!("Level({})", severity))
    }

    /// Case-insensitive lookup of a level's severity
    pub fn level_number(&self, name: &str) -> Result<i32> {
        let canonical = name.trim().to_uppercase();
        self.entries
            .read()
            .iter()
            .find(|entry| entry.name == canonical)
            .map(|entry| entry.severity)
            .ok_or_else(|| LoggerError::unknown_level(canonical))
    }

    /// Resolve a level reference to its severity
    pub fn resolve(&self, level: &Level) -> Result<i32> {
        match level {
            Level::Name(name) => self.level_number(name),
            Level::Severity(severity) => Ok(*severity),
        }
    }

    /// Look up a level by name or by number
    ///
    /// Names must be registered; numbers always resolve, using the
    /// `Level(<n>)` sentinel when no name matches.
    pub fn get_level(&self, level: &Level) -> Result<LevelEntry> {
        match level {
            Level::Name(name) => Ok(LevelEntry {
                name: name.trim().to_uppercase(),
                severity: self.level_number(name)?,
            }),
            Level::Severity(severity) => Ok(LevelEntry {
                name: self.level_name(*severity),
                severity: *severity,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.level_number(name).is_ok()
    }

    /// Snapshot of all registered levels in registration order
    pub fn levels(&self) -> Vec<LevelEntry> {
        self.entries.read().clone()
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
