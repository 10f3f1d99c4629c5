//! Criterion benchmarks for rust_logged

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logged::prelude::*;
use rust_logged::{DateFormat, FieldOptions};
use serde_json::json;
use std::sync::Arc;

fn capture_logging(mode: DispatchMode) -> (Logging, Arc<MemoryHandler>) {
    let logging = Logging::builder().dispatch_mode(mode).build();
    let capture = Arc::new(MemoryHandler::new(TRACE));
    logging.add_handler(capture.clone());
    (logging, capture)
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_inline_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_logging");
    group.throughput(Throughput::Elements(1));

    let (logging, capture) = capture_logging(DispatchMode::Inline);
    let logger = logging.get_logger("bench.inline");

    group.bench_function("info_text", |b| {
        b.iter(|| {
            logger.info(black_box("Info message")).unwrap();
            capture.clear();
        });
    });

    group.bench_function("info_structured", |b| {
        b.iter(|| {
            logger
                .info(black_box(json!({"message": "request", "status": 200, "path": "/api"})))
                .unwrap();
            capture.clear();
        });
    });

    group.bench_function("filtered_out", |b| {
        let quiet = Arc::new(MemoryHandler::new(FATAL));
        let logging = Logging::builder().dispatch_mode(DispatchMode::Inline).build();
        logging.add_handler(quiet);
        let logger = logging.get_logger("bench.quiet");
        b.iter(|| logger.debug(black_box("Debug message")).unwrap());
    });

    group.finish();
}

fn bench_background_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("background_logging");
    group.throughput(Throughput::Elements(100));

    let (logging, capture) = capture_logging(DispatchMode::Background);
    let logger = logging.get_logger("bench.background");

    group.bench_function("burst_100_then_flush", |b| {
        b.iter(|| {
            for i in 0..100 {
                logger.info(format!("message {}", i)).unwrap();
            }
            logging.flush().unwrap();
            capture.clear();
        });
    });

    group.finish();
}

fn bench_propagation_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation_depth");

    for depth in [1usize, 4, 16] {
        let (logging, capture) = capture_logging(DispatchMode::Inline);
        let path = (0..depth).map(|i| format!("n{}", i)).collect::<Vec<_>>().join(".");
        let logger = logging.get_logger(&path);

        group.bench_function(format!("depth_{}", depth), |b| {
            b.iter(|| {
                logger.info(black_box("propagated")).unwrap();
                capture.clear();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_template_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_formatting");
    group.throughput(Throughput::Elements(1));

    let levels = LevelRegistry::new();
    let record = RecordDraft::new("Formatted message")
        .with_level(WARN)
        .with_name("bench.fmt")
        .with_field("args", json!([1, "two", {"three": 3}]))
        .with_field("elapsed", 12.5)
        .finalize(INFO, "bench.fmt")
        .unwrap();

    let default = TemplateFormatter::default();
    group.bench_function("default_template", |b| {
        b.iter(|| black_box(default.format(black_box(&record), &levels)));
    });

    let padded = TemplateFormatter::new(
        "{createdAt} {level:8} {name:20} {elapsed:06.3} {args.2.three:?} {message}",
        "%Y-%m-%d %H:%M:%S",
    );
    group.bench_function("padded_template", |b| {
        b.iter(|| black_box(padded.format(black_box(&record), &levels)));
    });

    group.bench_function("field_options_apply", |b| {
        let options = FieldOptions::parse("?010.4");
        b.iter(|| black_box(options.apply(black_box("123.45"))));
    });

    group.bench_function("date_format", |b| {
        let format = DateFormat::new("%Y-%m-%dT%H:%M:%S");
        let now = chrono::Utc::now();
        b.iter(|| black_box(format.format(black_box(&now))));
    });

    group.finish();
}

// ============================================================================
// Builder Benchmarks
// ============================================================================

fn bench_record_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_builder");
    group.throughput(Throughput::Elements(1));

    let builder = SimpleBuilder::new();

    group.bench_function("text", |b| {
        b.iter(|| black_box(builder.build(black_box("text message").into()).unwrap()));
    });

    group.bench_function("structured", |b| {
        b.iter(|| {
            let payload = json!({"message": "structured", "user": "ada", "attempt": 3});
            black_box(builder.build(payload.into()).unwrap())
        });
    });

    group.bench_function("with_args", |b| {
        b.iter(|| {
            let args = rust_logged::log_args!("copied {} files", 42, json!({"dest": "/tmp"}));
            black_box(builder.build(args).unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Level Registry Benchmarks
// ============================================================================

fn bench_level_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_lookup");

    let levels = LevelRegistry::new();
    for i in 0..20 {
        levels.add_level(&format!("custom{}", i), 100 + i);
    }

    group.bench_function("number_by_name", |b| {
        b.iter(|| black_box(levels.level_number(black_box("custom19")).unwrap()));
    });

    group.bench_function("name_by_number", |b| {
        b.iter(|| black_box(levels.level_name(black_box(WARN))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inline_logging,
    bench_background_logging,
    bench_propagation_depth,
    bench_template_formatting,
    bench_record_builder,
    bench_level_lookup,
);
criterion_main!(benches);
