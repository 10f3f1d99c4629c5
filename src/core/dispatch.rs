//! Handler dispatch
//!
//! Loggers never call handlers directly: every accepted `(handler, record)`
//! pair is scheduled on the context's dispatcher. In background mode a
//! single worker thread drains an unbounded channel, so handlers run in
//! exactly the order they were scheduled while the emitting call returns
//! immediately.

use super::{
    error::{LoggerError, Result},
    handler::Handler,
    log_level::LevelRegistry,
    log_record::LogRecord,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for dispatcher cleanup (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How handler invocations are executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchMode {
    /// Run handlers on the calling thread; handler errors reach the caller
    Inline,

    /// Queue handler invocations for a dedicated worker thread
    #[default]
    Background,
}

enum Task {
    Handle {
        handler: Arc<dyn Handler>,
        record: Arc<LogRecord>,
    },
    Barrier(Sender<()>),
}

pub struct Dispatcher {
    mode: DispatchMode,
    levels: LevelRegistry,
    metrics: Arc<LoggerMetrics>,
    sender: Option<Sender<Task>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(mode: DispatchMode, levels: LevelRegistry, metrics: Arc<LoggerMetrics>) -> Self {
        let (sender, worker) = match mode {
            DispatchMode::Inline => (None, None),
            DispatchMode::Background => {
                let (sender, receiver) = unbounded();
                let worker_levels = levels.clone();
                let worker_metrics = Arc::clone(&metrics);
                let handle = thread::Builder::new()
                    .name("logged-dispatch".to_string())
                    .spawn(move || Self::run_worker(receiver, worker_levels, worker_metrics))
                    .ok();
                if handle.is_none() {
                    eprintln!(
                        "[LOGGER WARNING] Failed to spawn dispatch worker, falling back to inline dispatch"
                    );
                    return Self {
                        mode: DispatchMode::Inline,
                        levels,
                        metrics,
                        sender: None,
                        worker: None,
                    };
                }
                (Some(sender), handle)
            }
        };

        Self {
            mode,
            levels,
            metrics,
            sender,
            worker,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    fn run_worker(receiver: Receiver<Task>, levels: LevelRegistry, metrics: Arc<LoggerMetrics>) {
        for task in receiver.iter() {
            match task {
                Task::Handle { handler, record } => {
                    Self::run_isolated(handler.as_ref(), &record, &levels, &metrics);
                }
                Task::Barrier(ack) => {
                    let _ = ack.send(());
                }
            }
        }
    }

    /// Run one handler invocation with panic isolation
    ///
    /// A failing or panicking handler only loses its own invocation; the
    /// worker keeps serving the rest of the queue.
    fn run_isolated(
        handler: &dyn Handler,
        record: &LogRecord,
        levels: &LevelRegistry,
        metrics: &LoggerMetrics,
    ) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handler.handle(record, levels)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                metrics.record_failure();
                eprintln!("[LOGGER ERROR] Handler '{}' failed: {}", handler.name(), e);
            }
            Err(panic_info) => {
                metrics.record_failure();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Handler '{}' panicked: {}. \
                     Other handlers continue to function.",
                    handler.name(),
                    panic_msg
                );
            }
        }
    }

    /// Schedule a handler invocation
    ///
    /// Inline mode runs it immediately and returns the handler's result.
    pub fn dispatch(&self, handler: Arc<dyn Handler>, record: Arc<LogRecord>) -> Result<()> {
        self.metrics.record_dispatch();
        match (self.mode, &self.sender) {
            (DispatchMode::Background, Some(sender)) => sender
                .send(Task::Handle { handler, record })
                .map_err(|_| LoggerError::DispatcherStopped),
            (DispatchMode::Background, None) => Err(LoggerError::DispatcherStopped),
            (DispatchMode::Inline, _) => handler.handle(&record, &self.levels).inspect_err(|_| {
                self.metrics.record_failure();
            }),
        }
    }

    /// Block until every invocation scheduled so far has run
    ///
    /// Must not be called from inside a handler running on the worker.
    pub fn drain(&self) -> Result<()> {
        let Some(ref sender) = self.sender else {
            return Ok(());
        };
        let (ack, done) = bounded(1);
        sender
            .send(Task::Barrier(ack))
            .map_err(|_| LoggerError::DispatcherStopped)?;
        done.recv().map_err(|_| LoggerError::DispatcherStopped)
    }

    /// Stop the worker after it has drained the queue
    ///
    /// Returns `true` if the worker finished within `timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker finish the queued tasks and exit
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatch worker panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Dispatch worker did not finish within {:?} timeout. \
                     Some records may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}
