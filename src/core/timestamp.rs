//! Timestamp rendering for the `createdAt` field
//!
//! A small directive language, independent of strftime:
//!
//! | Directive | Output                          |
//! |-----------|---------------------------------|
//! | `%Y`      | four-digit year                 |
//! | `%m`      | two-digit month                 |
//! | `%d`      | two-digit day of month          |
//! | `%H`      | two-digit hour (24h)            |
//! | `%M`      | two-digit minute                |
//! | `%S`      | two-digit second                |
//! | `%i`      | ISO 8601, `2025-01-08T10:30:45.123Z` |
//! | `%%`      | literal `%`                     |
//!
//! Any other character after `%` is dropped together with the `%`.
//! All fields are rendered in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Date sub-format of a template formatter
///
/// # Examples
///
/// ```
/// use rust_logged::DateFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(DateFormat::new("%Y/%m/%d %H:%M").format(&at), "2025/01/08 10:30");
/// assert_eq!(DateFormat::default().format(&at), "2025-01-08T10:30:45.000Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 16);
        let mut chars = self.pattern.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('Y') => out.push_str(&format!("{:04}", datetime.year())),
                Some('m') => out.push_str(&format!("{:02}", datetime.month())),
                Some('d') => out.push_str(&format!("{:02}", datetime.day())),
                Some('H') => out.push_str(&format!("{:02}", datetime.hour())),
                Some('M') => out.push_str(&format!("{:02}", datetime.minute())),
                Some('S') => out.push_str(&format!("{:02}", datetime.second())),
                Some('i') => out.push_str(&iso8601(datetime)),
                Some('%') => out.push('%'),
                _ => {}
            }
        }

        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new("%i")
    }
}

/// ISO 8601 with milliseconds in UTC
pub fn iso8601(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_directive() {
        let result = DateFormat::new("%i").format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_numeric_directives() {
        let result = DateFormat::new("%Y-%m-%d %H:%M:%S").format(&fixed_datetime());
        assert_eq!(result, "2025-01-08 10:30:45");
    }

    #[test]
    fn test_literal_percent() {
        let result = DateFormat::new("100%% at %H").format(&fixed_datetime());
        assert_eq!(result, "100% at 10");
    }

    #[test]
    fn test_unknown_directive_is_dropped() {
        let result = DateFormat::new("[%Y%q]").format(&fixed_datetime());
        assert_eq!(result, "[2025]");
    }

    #[test]
    fn test_trailing_percent_is_dropped() {
        let result = DateFormat::new("%d%").format(&fixed_datetime());
        assert_eq!(result, "08");
    }

    #[test]
    fn test_small_year_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(812, 3, 4, 5, 6, 7).single().expect("valid datetime");
        assert_eq!(DateFormat::new("%Y-%m-%d").format(&at), "0812-03-04");
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(DateFormat::default().pattern(), "%i");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&DateFormat::new("%Y")).expect("serialize");
        assert_eq!(json, r#"{"pattern":"%Y"}"#);
    }
}
