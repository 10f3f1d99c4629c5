//! Template formatting for log records
//!
//! A template is plain text with embedded field references:
//!
//! ```text
//! {path}
//! {path:options}
//! ```
//!
//! `path` starts with a letter and continues with letters, digits, `_` or
//! `.`; dots navigate into nested fields (`{request.id}`, `{args.0}`).
//! The record attributes `level`, `name`, `createdAt` and `message` are
//! addressed directly, everything else is looked up in the record fields.
//!
//! `options` are read left to right:
//!
//! 1. `?` skips the value when it is empty (`""`, `undefined`, `{}`, `[]`)
//! 2. `0` pads with zeros instead of spaces
//! 3. a digit run sets the minimum width of the integer part
//! 4. `.` and a digit run set the minimum width of the fractional part
//!
//! Padding only ever grows content. Formatting never fails: unknown
//! fields render empty and malformed references are kept as literal text.

use super::log_level::LevelRegistry;
use super::log_record::{value_to_text, LogRecord};
use super::timestamp::DateFormat;
use serde_json::Value;

pub const DEFAULT_TEMPLATE: &str = "[{createdAt}][{name}] {level}: {message} {args:?}";

/// Renders a record to the line a handler writes
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord, levels: &LevelRegistry) -> String;

    fn name(&self) -> &str {
        "formatter"
    }
}

/// Options attached to a field reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub skip_empty: bool,
    pub pad: char,
    pub width: usize,
    pub decimals: usize,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            skip_empty: false,
            pad: ' ',
            width: 0,
            decimals: 0,
        }
    }
}

impl FieldOptions {
    /// Parse an option string; characters outside the grammar are ignored
    pub fn parse(options: &str) -> Self {
        let mut parsed = Self::default();
        let mut chars = options.chars().peekable();

        if chars.next_if_eq(&'?').is_some() {
            parsed.skip_empty = true;
        }
        if chars.next_if_eq(&'0').is_some() {
            parsed.pad = '0';
        }
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            parsed.width = parsed.width * 10 + digit as usize - '0' as usize;
        }
        if chars.next_if_eq(&'.').is_some() {
            while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                parsed.decimals = parsed.decimals * 10 + digit as usize - '0' as usize;
            }
        }

        parsed
    }

    /// Transform rendered content according to the options
    ///
    /// ```
    /// use rust_logged::FieldOptions;
    ///
    /// assert_eq!(FieldOptions::parse("03").apply("7"), "007");
    /// assert_eq!(FieldOptions::parse("0.2").apply("7"), "7.00");
    /// assert_eq!(FieldOptions::parse("?").apply("[]"), "");
    /// ```
    pub fn apply(&self, content: &str) -> String {
        if self.skip_empty && is_empty_content(content) {
            return String::new();
        }
        if self.width == 0 && self.decimals == 0 {
            return content.to_string();
        }

        let (integer, fraction) = match content.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (content, None),
        };

        let mut out = String::with_capacity(self.width.max(content.len()) + self.decimals + 1);
        let integer_len = integer.chars().count();
        out.extend(std::iter::repeat(self.pad).take(self.width.saturating_sub(integer_len)));
        out.push_str(integer);

        if self.decimals > 0 {
            let fraction = fraction.unwrap_or("");
            out.push('.');
            out.push_str(fraction);
            let fraction_len = fraction.chars().count();
            out.extend(std::iter::repeat(self.pad).take(self.decimals.saturating_sub(fraction_len)));
        } else if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }

        out
    }
}

fn is_empty_content(content: &str) -> bool {
    matches!(content, "" | "undefined" | "{}" | "[]")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { path: Vec<String>, options: FieldOptions },
}

/// Parse a template into literal and field segments
fn parse_template(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        literal.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match parse_reference(candidate) {
            Some((segment, consumed)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(segment);
                rest = &candidate[consumed..];
            }
            None => {
                literal.push('{');
                rest = &candidate[1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Parse `{path[:options]}` at the start of `input`, returning the segment and its length
fn parse_reference(input: &str) -> Option<(Segment, usize)> {
    let body = input.strip_prefix('{')?;
    let end = body.find('}')?;
    let inner = &body[..end];

    let (path, options) = match inner.split_once(':') {
        Some((path, options)) => (path, FieldOptions::parse(options)),
        None => (inner, FieldOptions::default()),
    };

    let mut chars = path.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !starts_with_letter || !valid_rest {
        return None;
    }

    let path = path
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    Some((Segment::Field { path, options }, end + 2))
}

/// Template-driven formatter used by the console handler
///
/// # Example
///
/// ```
/// use rust_logged::{Formatter, LevelRegistry, RecordDraft, TemplateFormatter};
///
/// let formatter = TemplateFormatter::new("{level:5} {name}: {message} (took {ms:0.2}ms)", "%i");
/// let record = RecordDraft::new("query done")
///     .with_field("ms", 3)
///     .finalize(20, "svc.db")
///     .unwrap();
///
/// assert_eq!(
///     formatter.format(&record, &LevelRegistry::new()),
///     " INFO svc.db: query done (took 3.00ms)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: String,
    segments: Vec<Segment>,
    date_format: DateFormat,
}

impl TemplateFormatter {
    pub fn new(template: impl Into<String>, date_format: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            segments: parse_template(&template),
            template,
            date_format: DateFormat::new(date_format),
        }
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self::new(template, DateFormat::default().pattern())
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    /// Render one field path; `None` when the path does not resolve
    fn resolve(&self, path: &[String], record: &LogRecord, levels: &LevelRegistry) -> Option<String> {
        let (head, tail) = path.split_first()?;
        match (head.as_str(), tail.is_empty()) {
            ("level", true) => Some(levels.level_name(record.level)),
            ("name", true) => Some(record.name.clone()),
            ("message", true) => Some(record.message.clone()),
            ("createdAt", true) => Some(self.date_format.format(&record.created_at)),
            ("level" | "name" | "message" | "createdAt", false) => None,
            _ => {
                let mut value = record.fields.get(head.as_str())?;
                for key in tail {
                    value = match value {
                        Value::Object(map) => map.get(key.as_str())?,
                        Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                        _ => return None,
                    };
                }
                Some(value_to_text(value))
            }
        }
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, "%i")
    }
}

impl Formatter for TemplateFormatter {
    fn format(&self, record: &LogRecord, levels: &LevelRegistry) -> String {
        let mut out = String::with_capacity(self.template.len() + record.message.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { path, options } => {
                    let content = self.resolve(path, record, levels).unwrap_or_default();
                    out.push_str(&options.apply(&content));
                }
            }
        }
        out
    }

    fn name(&self) -> &str {
        "TemplateFormatter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_record::RecordDraft;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    fn record(message: &str) -> LogRecord {
        RecordDraft::new(message)
            .with_created_at(fixed_datetime())
            .with_field("args", json!([]))
            .finalize(20, "svc.db")
            .expect("valid record")
    }

    #[test]
    fn test_default_template() {
        let line = TemplateFormatter::default().format(&record("ok"), &LevelRegistry::new());
        assert_eq!(line, "[2025-01-08T10:30:45.123Z][svc.db] INFO: ok ");
    }

    #[test]
    fn test_args_render_when_present() {
        let mut rec = record("ok");
        rec.fields.insert("args".into(), json!([1, "a"]));
        let line = TemplateFormatter::default().format(&rec, &LevelRegistry::new());
        assert!(line.ends_with(r#"INFO: ok [1,"a"]"#));
    }

    #[test]
    fn test_options_parse() {
        assert_eq!(
            FieldOptions::parse("?05.2"),
            FieldOptions { skip_empty: true, pad: '0', width: 5, decimals: 2 }
        );
        assert_eq!(FieldOptions::parse("12"), FieldOptions { width: 12, ..FieldOptions::default() });
        assert_eq!(FieldOptions::parse(".3").decimals, 3);
    }

    #[test]
    fn test_padding() {
        assert_eq!(FieldOptions::parse("03").apply("7"), "007");
        assert_eq!(FieldOptions::parse("0.2").apply("7"), "7.00");
        assert_eq!(FieldOptions::parse("4").apply("ab"), "  ab");
        assert_eq!(FieldOptions::parse("0.3").apply("3.14159"), "3.14159");
        assert_eq!(FieldOptions::parse("04.3").apply("1.5"), "0001.500");
    }

    #[test]
    fn test_padding_never_truncates() {
        assert_eq!(FieldOptions::parse("2").apply("12345"), "12345");
    }

    #[test]
    fn test_split_on_first_dot() {
        assert_eq!(FieldOptions::parse("3.4").apply("1.2.3"), "  1.2.3 ");
    }

    #[test]
    fn test_skip_empty() {
        let options = FieldOptions::parse("?");
        for empty in ["", "undefined", "{}", "[]"] {
            assert_eq!(options.apply(empty), "");
        }
        assert_eq!(options.apply("x"), "x");
        assert_eq!(FieldOptions::default().apply("[]"), "[]");
    }

    #[test]
    fn test_repeated_references() {
        let formatter = TemplateFormatter::with_template("{message}{message} {message}");
        assert_eq!(formatter.format(&record("ab"), &LevelRegistry::new()), "abab ab");
    }

    #[test]
    fn test_nested_paths() {
        let mut rec = record("ok");
        rec.fields.insert("request".into(), json!({"id": "r-1", "tags": ["a", "b"]}));
        rec.fields.insert("args".into(), json!([7, {"k": true}]));

        let formatter =
            TemplateFormatter::with_template("{request.id} {request.tags.1} {args.0:03} {args.1.k}");
        assert_eq!(formatter.format(&rec, &LevelRegistry::new()), "r-1 b 007 true");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let formatter = TemplateFormatter::with_template("<{nope}><{nope:?}><{args.5}><{level.x}>");
        assert_eq!(formatter.format(&record("ok"), &LevelRegistry::new()), "<><><><>");
    }

    #[test]
    fn test_malformed_references_stay_literal() {
        let formatter = TemplateFormatter::with_template("{ message } {1abc} {unclosed {message}");
        assert_eq!(
            formatter.format(&record("ok"), &LevelRegistry::new()),
            "{ message } {1abc} {unclosed ok"
        );
    }

    #[test]
    fn test_substituted_content_is_not_rescanned() {
        let formatter = TemplateFormatter::with_template("{message}");
        assert_eq!(
            formatter.format(&record("{message}"), &LevelRegistry::new()),
            "{message}"
        );
    }

    #[test]
    fn test_reference_inside_field_value_stays_literal() {
        let mut rec = record("see {args} and {name:05}");
        rec.fields.insert("args".into(), json!([1]));
        rec.fields.insert("note".into(), json!("{message}"));

        let formatter = TemplateFormatter::with_template("{message} | {args} | {note}");
        assert_eq!(
            formatter.format(&rec, &LevelRegistry::new()),
            "see {args} and {name:05} | [1] | {message}"
        );
    }

    #[test]
    fn test_level_name_lookup() {
        let levels = LevelRegistry::new();
        let formatter = TemplateFormatter::with_template("{level}");

        let mut rec = record("ok");
        rec.level = 33;
        assert_eq!(formatter.format(&rec, &levels), "Level(33)");

        levels.add_level("NOTICE", 33);
        assert_eq!(formatter.format(&rec, &levels), "NOTICE");
    }

    #[test]
    fn test_custom_date_format() {
        let formatter = TemplateFormatter::new("{createdAt} {message}", "%Y%m%d-%H%M%S");
        assert_eq!(
            formatter.format(&record("ok"), &LevelRegistry::new()),
            "20250108-103045 ok"
        );
    }

    #[test]
    fn test_unreferenced_fields_are_ignored() {
        let mut rec = record("ok");
        rec.fields.insert("secret".into(), json!("hidden"));
        let line = TemplateFormatter::with_template("{message}").format(&rec, &LevelRegistry::new());
        assert_eq!(line, "ok");
    }
}
