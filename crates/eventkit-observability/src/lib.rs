//! # eventkit-observability
//!
//! Side-channel reporting for EventKit operations.
//!
//! ## Reporting
//! [`observe`] wraps a fallible unit of work in a report scope obtained from
//! an [`ObservabilityService`] and marks it OK or Error. The result is
//! returned untouched.
//!
//! ## Backends
//! - [`NoopObservability`] — discards every report
//! - [`TracingObservability`] — one `tracing` span per operation
//! - [`MetricsObservability`] — OpenTelemetry counters + latency histogram
//!
//! ## Built-in metrics
//! - `eventkit.operations`           — counter, tagged with operation
//! - `eventkit.operation_errors`     — counter, tagged with operation
//! - `eventkit.operation_latency_ms` — histogram, tagged with operation
//!
//! ## Structured logging
//! [`init_tracing`] installs a `tracing-subscriber` with per-component levels
//! and optional JSON output.

pub mod metrics;
pub mod service;
pub mod tracing_setup;

pub use metrics::{EventkitMetrics, MetricsObservability};
pub use service::{
    observe, NoopObservability, ObservabilityService, Outcome, Reporter, TracingObservability,
};
pub use tracing_setup::{init_tracing, LogConfig, TracingConfig};
