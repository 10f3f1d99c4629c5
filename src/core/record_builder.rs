//! Record builders: normalize call arguments into record drafts
//!
//! A logging call accepts a heterogeneous argument list. The first argument
//! decides how the record is shaped:
//!
//! - a structured payload (JSON object) is merged into the record, an
//!   optional `message` key included
//! - text becomes the message verbatim
//! - anything else is serialized to text and becomes the message
//!
//! Remaining arguments are kept, in order, under the `args` field.

use super::error::{LoggerError, Result};
use super::log_record::{value_to_text, RecordDraft};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One call argument, classified once at the call boundary
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Fields(Map<String, Value>),
    Text(String),
    Other(Value),
}

impl LogArg {
    pub fn into_value(self) -> Value {
        match self {
            LogArg::Fields(map) => Value::Object(map),
            LogArg::Text(text) => Value::String(text),
            LogArg::Other(value) => value,
        }
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LogArg::Fields(map),
            Value::String(text) => LogArg::Text(text),
            other => LogArg::Other(other),
        }
    }
}

impl From<Map<String, Value>> for LogArg {
    fn from(map: Map<String, Value>) -> Self {
        LogArg::Fields(map)
    }
}

impl From<&str> for LogArg {
    fn from(text: &str) -> Self {
        LogArg::Text(text.to_string())
    }
}

impl From<String> for LogArg {
    fn from(text: String) -> Self {
        LogArg::Text(text)
    }
}

impl From<&String> for LogArg {
    fn from(text: &String) -> Self {
        LogArg::Text(text.clone())
    }
}

macro_rules! scalar_log_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    LogArg::Other(Value::from(value))
                }
            }
        )*
    };
}

scalar_log_arg!(i32, i64, u32, u64, usize, f64, bool);

/// Ordered call arguments
///
/// Usually produced through `From` conversions or the [`log_args!`](crate::log_args) macro:
///
/// ```
/// use rust_logged::{log_args, LogArgs};
/// use serde_json::json;
///
/// let single: LogArgs = "hello".into();
/// assert_eq!(single.len(), 1);
///
/// let many = log_args!("user {} logged in", json!({"id": 5}), 3);
/// assert_eq!(many.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs(Vec<LogArg>);

impl LogArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<LogArg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<LogArg>) {
        self.0.push(arg.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<LogArg> {
        self.0
    }
}

impl From<LogArg> for LogArgs {
    fn from(arg: LogArg) -> Self {
        Self(vec![arg])
    }
}

impl From<Vec<LogArg>> for LogArgs {
    fn from(args: Vec<LogArg>) -> Self {
        Self(args)
    }
}

impl From<Vec<Value>> for LogArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values.into_iter().map(LogArg::from).collect())
    }
}

macro_rules! single_log_args {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArgs {
                fn from(value: $ty) -> Self {
                    Self(vec![LogArg::from(value)])
                }
            }
        )*
    };
}

single_log_args!(Value, Map<String, Value>, &str, String, &String, i32, i64, u32, u64, usize, f64, bool);

impl<A: Into<LogArg>, B: Into<LogArg>> From<(A, B)> for LogArgs {
    fn from((a, b): (A, B)) -> Self {
        Self(vec![a.into(), b.into()])
    }
}

impl<A: Into<LogArg>, B: Into<LogArg>, C: Into<LogArg>> From<(A, B, C)> for LogArgs {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self(vec![a.into(), b.into(), c.into()])
    }
}

/// Turns call arguments into a record draft
pub trait Builder: Send + Sync {
    fn build(&self, args: LogArgs) -> Result<RecordDraft>;
    fn name(&self) -> &str;
}

/// The default builder
///
/// ```
/// use rust_logged::{Builder, SimpleBuilder};
/// use serde_json::json;
///
/// let draft = SimpleBuilder.build(json!({"message": "hi", "userId": 5}).into()).unwrap();
/// assert_eq!(draft.message.as_deref(), Some("hi"));
/// assert_eq!(draft.fields["userId"], 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleBuilder;

impl SimpleBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Merge a structured payload; reserved keys map onto record attributes
    fn merge_fields(draft: &mut RecordDraft, fields: Map<String, Value>) {
        for (key, value) in fields {
            let level = value.as_i64().and_then(|level| i32::try_from(level).ok());
            let created_at = value
                .as_str()
                .and_then(|at| DateTime::parse_from_rfc3339(at).ok())
                .map(|at| at.with_timezone(&Utc));

            match key.as_str() {
                "message" if value.is_null() => draft.message = None,
                "message" => draft.message = Some(value_to_text(&value)),
                "name" if value.is_string() => draft.name = Some(value_to_text(&value)),
                "level" if level.is_some() => draft.level = level,
                "createdAt" if created_at.is_some() => draft.created_at = created_at,
                _ => {
                    draft.fields.insert(key, value);
                }
            }
        }
    }
}

impl Builder for SimpleBuilder {
    fn build(&self, args: LogArgs) -> Result<RecordDraft> {
        let mut args = args.into_vec().into_iter();
        let first = args.next().ok_or(LoggerError::MissingArgument)?;
        let rest: Vec<Value> = args.map(LogArg::into_value).collect();

        let mut draft = RecordDraft::default();
        draft.fields.insert("args".to_string(), Value::Array(rest));

        match first {
            LogArg::Fields(fields) => Self::merge_fields(&mut draft, fields),
            LogArg::Text(text) => draft.message = Some(text),
            LogArg::Other(value) => draft.message = Some(value_to_text(&value)),
        }

        if draft.message.as_deref().map_or(true, str::is_empty) {
            return Err(LoggerError::EmptyMessage);
        }
        if draft.created_at.is_none() {
            draft.created_at = Some(Utc::now());
        }

        Ok(draft)
    }

    fn name(&self) -> &str {
        "SimpleBuilder"
    }
}
