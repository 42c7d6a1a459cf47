//! EventKit metrics definitions.
//!
//! All metrics use OpenTelemetry conventions and are exported through
//! whatever `MeterProvider` the application installs.

use std::time::Instant;

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

use crate::service::{ObservabilityService, Outcome, Reporter};
use crate::tracing_setup::TracingConfig;

const METER_NAME: &str = "eventkit";

/// Central metrics handle for EventKit.
///
/// Every data point carries a `service` attribute naming the emitting
/// application, taken from [`TracingConfig::service_name`].
#[derive(Clone)]
pub struct EventkitMetrics {
    pub operations: Counter<u64>,
    pub operation_errors: Counter<u64>,
    pub operation_latency_ms: Histogram<f64>,
    service: String,
}

impl EventkitMetrics {
    pub fn new(meter: &Meter, config: &TracingConfig) -> Self {
        Self {
            service: config.service_name.clone(),
            operations: meter
                .u64_counter("eventkit.operations")
                .with_description("Total number of observed operations")
                .build(),
            operation_errors: meter
                .u64_counter("eventkit.operation_errors")
                .with_description("Observed operations that returned an error")
                .build(),
            operation_latency_ms: meter
                .f64_histogram("eventkit.operation_latency_ms")
                .with_description("Operation latency in milliseconds")
                .build(),
        }
    }

    /// Instruments registered on the global meter provider.
    pub fn global(config: &TracingConfig) -> Self {
        Self::new(&global::meter(METER_NAME), config)
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    pub fn record(&self, operation: &'static str, outcome: Outcome, ms: f64) {
        let service = KeyValue::new("service", self.service.clone());
        let op = KeyValue::new("operation", operation);
        self.operations.add(
            1,
            &[
                service.clone(),
                op.clone(),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
        if outcome == Outcome::Error {
            self.operation_errors.add(1, &[service.clone(), op.clone()]);
        }
        self.operation_latency_ms.record(ms, &[service, op]);
    }
}

/// [`ObservabilityService`] that feeds [`EventkitMetrics`].
#[derive(Clone)]
pub struct MetricsObservability {
    metrics: EventkitMetrics,
}

impl MetricsObservability {
    pub fn new(metrics: EventkitMetrics) -> Self {
        Self { metrics }
    }
}

struct MetricsReporter {
    metrics: EventkitMetrics,
    operation: &'static str,
    started: Instant,
}

impl Reporter for MetricsReporter {
    fn finish(self: Box<Self>, outcome: Outcome) {
        let ms = self.started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics.record(self.operation, outcome, ms);
    }
}

impl ObservabilityService for MetricsObservability {
    fn start(&self, operation: &'static str) -> Box<dyn Reporter> {
        Box::new(MetricsReporter {
            metrics: self.metrics.clone(),
            operation,
            started: Instant::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::observe;

    // No provider is installed in tests, so the global meter is a no-op;
    // this only checks the reporting path does not disturb results.
    #[test]
    fn metrics_backend_passes_results_through() {
        let svc = MetricsObservability::new(EventkitMetrics::global(&TracingConfig::default()));
        let ok: Result<&str, ()> = observe(&svc, "codec.encode", || Ok("bytes"));
        assert_eq!(ok, Ok("bytes"));
        let err: Result<(), &str> = observe(&svc, "codec.decode", || Err("bad"));
        assert_eq!(err, Err("bad"));
    }

    #[test]
    fn service_name_comes_from_tracing_config() {
        let config = TracingConfig {
            service_name: "billing".into(),
        };
        assert_eq!(EventkitMetrics::global(&config).service_name(), "billing");
        assert_eq!(
            EventkitMetrics::global(&TracingConfig::default()).service_name(),
            "eventkit"
        );
    }
}
