//! # configure_client
//!
//! Builds a client from a settings document plus programmatic options,
//! prepares an outgoing event and encodes its payload with metrics enabled.
//!
//! Run with:
//! ```sh
//! cargo run --bin configure_client
//!
//! # With JSON logging:
//! LOG_JSON=1 cargo run --bin configure_client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use eventkit_client::{
    with_event_defaulter, with_observability_service, Client, ClientSettings, EventDefaulter,
};
use eventkit_core::Event;
use eventkit_observability::{
    init_tracing, EventkitMetrics, LogConfig, MetricsObservability, TracingConfig,
};
use serde_json::json;
use tracing::info;

const SETTINGS: &str = r#"
encoding: binary
uuids: true
time_now: true
poll_concurrency: 4
"#;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────────────────────
    let log_config = LogConfig {
        json: std::env::var("LOG_JSON").is_ok(),
        ..LogConfig::default()
    };
    init_tracing(&log_config)?;
    let telemetry = TracingConfig {
        service_name: "order-service".into(),
    };

    // ── 2. Options: settings first, then code-level additions ────────────────
    let mut options = ClientSettings::from_yaml_str(SETTINGS)
        .context("parsing client settings")?
        .to_options();
    options.push(with_event_defaulter(EventDefaulter::new(
        "default_subject",
        |mut e: Event| {
            if e.subject.is_none() {
                e.subject = Some("demo".into());
            }
            e
        },
    )));
    options.push(with_observability_service(Arc::new(MetricsObservability::new(
        EventkitMetrics::global(&telemetry),
    ))));

    let client = Client::new(&options)?;
    info!(
        service = %telemetry.service_name,
        workers = client.poll_concurrency(),
        encoding = %client.outbound_context().encoding,
        "client ready"
    );

    // ── 3. Prepare and encode ────────────────────────────────────────────────
    let (event, ctx) = client.prepare_outbound(
        Event::new("/demo/orders", "order.created")
            .with_data("application/json", json!({"sku": "X-1", "qty": 2})),
    );
    let payload = client.encode_data(&event)?;

    println!("id:       {}", event.id);
    println!("time:     {}", event.time.map(|t| t.to_rfc3339()).unwrap_or_default());
    println!("subject:  {}", event.subject.as_deref().unwrap_or(""));
    println!("encoding: {}", ctx.encoding);
    println!("payload:  {}", String::from_utf8_lossy(&payload));
    Ok(())
}
