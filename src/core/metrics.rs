//! Logging metrics for observability
//!
//! Counters for records emitted through the tree, handler dispatches,
//! threshold filtering, handler failures and root fallback installs.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics shared by every logger of a context
///
/// # Example
///
/// ```
/// use rust_logged::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatch();
/// metrics.record_failure();
///
/// assert_eq!(metrics.handler_dispatches(), 1);
/// assert_eq!(metrics.failure_rate(), 100.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that entered the logger tree
    records_emitted: AtomicU64,

    /// Handler invocations scheduled
    handler_dispatches: AtomicU64,

    /// Handler deliveries skipped because of the handler threshold
    filtered_out: AtomicU64,

    /// Handler invocations that returned an error or panicked
    handler_failures: AtomicU64,

    /// Times the root synthesized its default handler
    fallback_installs: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            handler_dispatches: AtomicU64::new(0),
            filtered_out: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            fallback_installs: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_dispatches(&self) -> u64 {
        self.handler_dispatches.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_out(&self) -> u64 {
        self.filtered_out.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_installs(&self) -> u64 {
        self.fallback_installs.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.records_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatch(&self) -> u64 {
        self.handler_dispatches.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_out.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fallback(&self) -> u64 {
        self.fallback_installs.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed handler invocations as a percentage (0.0 - 100.0) of dispatches
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn failure_rate(&self) -> f64 {
        let dispatches = self.handler_dispatches() as f64;
        if dispatches == 0.0 {
            0.0
        } else {
            (self.handler_failures() as f64 / dispatches) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_emitted.store(0, Ordering::Relaxed);
        self.handler_dispatches.store(0, Ordering::Relaxed);
        self.filtered_out.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.fallback_installs.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_emitted: AtomicU64::new(self.records_emitted()),
            handler_dispatches: AtomicU64::new(self.handler_dispatches()),
            filtered_out: AtomicU64::new(self.filtered_out()),
            handler_failures: AtomicU64::new(self.handler_failures()),
            fallback_installs: AtomicU64::new(self.fallback_installs()),
        }
    }
}
