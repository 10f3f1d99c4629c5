//! Property-based tests for rust_logged using proptest

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_logged::prelude::*;
use rust_logged::{DateFormat, FieldOptions};
use std::sync::Arc;

fn inline() -> Logging {
    Logging::builder().dispatch_mode(DispatchMode::Inline).build()
}

// ============================================================================
// Level Registry Tests
// ============================================================================

proptest! {
    /// Registered names survive a name -> number -> name round trip
    #[test]
    fn test_level_name_roundtrip(
        name in "[a-z][a-z_]{0,11}",
        severity in 100i32..10_000,
    ) {
        let levels = LevelRegistry::new();
        levels.add_level(&name, severity);

        let number = levels.level_number(&name).unwrap();
        prop_assert_eq!(number, severity);
        prop_assert_eq!(levels.level_name(number), name.to_uppercase());
    }

    /// Unregistered severities fall back to the sentinel name
    #[test]
    fn test_unregistered_severity_sentinel(severity in 51i32..100_000) {
        let levels = LevelRegistry::new();
        prop_assert_eq!(levels.level_name(severity), format!("Level({})", severity));
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A handler never sees records below its threshold
    #[test]
    fn test_monotonic_filtering(
        threshold in -100i32..100,
        severities in prop::collection::vec(-100i32..100, 1..20),
    ) {
        let logging = inline();
        let handler = Arc::new(MemoryHandler::with_template(threshold, "{message}"));
        logging.add_handler(handler.clone());

        let logger = logging.get_logger("prop");
        for severity in &severities {
            logger.log_at(*severity, "m").unwrap();
        }

        let expected = severities.iter().filter(|s| **s >= threshold).count();
        prop_assert_eq!(handler.len(), expected);
        prop_assert!(handler.records().iter().all(|r| r.level >= threshold));
    }

    /// Repeated lookups of a dotted path return the same logger
    #[test]
    fn test_get_logger_idempotent(
        segments in prop::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let logging = inline();
        let path = segments.join(".");

        let first = logging.get_logger(&path);
        let second = logging.get_logger(&path);
        prop_assert!(Arc::ptr_eq(&first, &second));
        prop_assert_eq!(first.name(), path);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Padding only grows content, never truncates it
    #[test]
    fn test_padding_never_truncates(
        content in "[a-z0-9]{0,12}",
        width in 0usize..20,
    ) {
        let options = FieldOptions { width, ..FieldOptions::default() };
        let padded = options.apply(&content);

        prop_assert!(padded.ends_with(&content));
        prop_assert_eq!(padded.len(), content.len().max(width));
    }

    /// Fractional padding keeps the integer part intact
    #[test]
    fn test_decimal_alignment(
        integer in 0u32..100_000,
        fraction in "[0-9]{1,4}",
        decimals in 1usize..8,
    ) {
        let content = format!("{}.{}", integer, fraction);
        let options = FieldOptions::parse(&format!("0.{}", decimals));
        let aligned = options.apply(&content);

        let (int_part, frac_part) = aligned.split_once('.').unwrap();
        prop_assert_eq!(int_part, integer.to_string());
        prop_assert_eq!(frac_part.len(), fraction.len().max(decimals));
    }

    /// Arbitrary templates render without panicking
    #[test]
    fn test_arbitrary_template_never_panics(template in ".{0,64}") {
        let levels = LevelRegistry::new();
        let record = RecordDraft::new("message")
            .finalize(INFO, "prop")
            .unwrap();
        let _ = TemplateFormatter::with_template(template).format(&record, &levels);
    }

    /// Arbitrary date patterns format without panicking
    #[test]
    fn test_date_format_never_panics(
        pattern in ".{0,32}",
        seconds in 0i64..4_102_444_800,
    ) {
        let datetime = Utc.timestamp_opt(seconds, 0).unwrap();
        let _ = DateFormat::new(pattern).format(&datetime);
    }
}
