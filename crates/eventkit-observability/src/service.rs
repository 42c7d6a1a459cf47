//! The reporting contract and the two log-only backends.

use std::time::Instant;

use tracing::{debug, Span};

/// Final state of a report scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// An open report scope. Consumed exactly once by [`Reporter::finish`].
pub trait Reporter: Send {
    fn finish(self: Box<Self>, outcome: Outcome);
}

/// A tracing/metrics backend that can open report scopes.
///
/// # Thread Safety
/// Implementations are shared as `Arc<dyn ObservabilityService>` between
/// the codec registry and every client built from it.
pub trait ObservabilityService: Send + Sync {
    /// Open a scope for one invocation of `operation`.
    fn start(&self, operation: &'static str) -> Box<dyn Reporter>;
}

/// Run `work` once inside a report scope and return its result unchanged.
pub fn observe<T, E>(
    service: &dyn ObservabilityService,
    operation: &'static str,
    work: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let reporter = service.start(operation);
    let result = work();
    reporter.finish(if result.is_ok() {
        Outcome::Ok
    } else {
        Outcome::Error
    });
    result
}

// ─── No-op backend ────────────────────────────────────────────────────────────

/// Discards all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObservability;

struct NoopReporter;

impl Reporter for NoopReporter {
    fn finish(self: Box<Self>, _outcome: Outcome) {}
}

impl ObservabilityService for NoopObservability {
    fn start(&self, _operation: &'static str) -> Box<dyn Reporter> {
        Box::new(NoopReporter)
    }
}

// ─── Tracing backend ──────────────────────────────────────────────────────────

/// Opens a `tracing` span per operation and logs its outcome and latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservability;

struct SpanReporter {
    span: Span,
    operation: &'static str,
    started: Instant,
}

impl Reporter for SpanReporter {
    fn finish(self: Box<Self>, outcome: Outcome) {
        let latency_ms = self.started.elapsed().as_secs_f64() * 1_000.0;
        let _entered = self.span.enter();
        debug!(
            operation = self.operation,
            outcome = outcome.as_str(),
            latency_ms,
            "operation finished"
        );
    }
}

impl ObservabilityService for TracingObservability {
    fn start(&self, operation: &'static str) -> Box<dyn Reporter> {
        Box::new(SpanReporter {
            span: tracing::debug_span!("eventkit.operation", operation),
            operation,
            started: Instant::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recording {
        log: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingReporter {
        operation: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Reporter for RecordingReporter {
        fn finish(self: Box<Self>, outcome: Outcome) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.operation, outcome.as_str()));
        }
    }

    impl ObservabilityService for Recording {
        fn start(&self, operation: &'static str) -> Box<dyn Reporter> {
            self.log.lock().unwrap().push(format!("{operation}:start"));
            Box::new(RecordingReporter {
                operation,
                log: Arc::clone(&self.log),
            })
        }
    }

    #[test]
    fn success_is_reported_ok_and_passed_through() {
        let svc = Recording::default();
        let out: Result<u32, String> = observe(&svc, "op", || Ok(42));
        assert_eq!(out, Ok(42));
        assert_eq!(*svc.log.lock().unwrap(), vec!["op:start", "op:ok"]);
    }

    #[test]
    fn failure_is_reported_error_and_passed_through() {
        let svc = Recording::default();
        let out: Result<(), String> = observe(&svc, "op", || Err("boom".to_string()));
        assert_eq!(out, Err("boom".to_string()));
        assert_eq!(*svc.log.lock().unwrap(), vec!["op:start", "op:error"]);
    }

    #[test]
    fn work_runs_exactly_once() {
        let calls = Mutex::new(0);
        let _: Result<(), ()> = observe(&TracingObservability, "op", || {
            *calls.lock().unwrap() += 1;
            Err(())
        });
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
