//! Log record structure

use super::error::{LoggerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A fully resolved record, as delivered to handlers
///
/// `fields` holds everything the caller supplied beyond the message,
/// including the positional `args` sequence produced by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub level: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    /// Caller-supplied field by key
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Positional arguments that followed the first call argument
    pub fn args(&self) -> &[Value] {
        match self.fields.get("args") {
            Some(Value::Array(args)) => args,
            _ => &[],
        }
    }

    /// Same record reported under another logger name
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A record skeleton whose level and name may still be unresolved
///
/// Builders produce drafts; the emitting logger fills in whatever the
/// builder left open before the record reaches any handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub level: Option<i32>,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub fields: Map<String, Value>,
}

impl RecordDraft {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Resolve the draft, using the given defaults for level and name
    ///
    /// Fails with [`LoggerError::EmptyMessage`] when no non-empty message was set.
    pub fn finalize(self, default_level: i32, default_name: &str) -> Result<LogRecord> {
        let message = match self.message {
            Some(message) if !message.is_empty() => message,
            _ => return Err(LoggerError::EmptyMessage),
        };

        Ok(LogRecord {
            level: self.level.unwrap_or(default_level),
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            message,
            fields: self.fields,
        })
    }
}

/// Text form of an arbitrary value
///
/// Strings render verbatim, scalars through their display form and
/// composites as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
