//! # pubsub_protocol
//!
//! Configures a queue-group protocol, renders an event in both binary and
//! structured mode, and reads each wire message back.
//!
//! Run with:
//! ```sh
//! RUST_LOG=info,eventkit_pubsub=debug cargo run --bin pubsub_protocol
//! ```

use std::sync::Arc;

use anyhow::Result;
use eventkit_client::{with_force_binary, with_uuids, Client};
use eventkit_core::{EncodingMode, Event, OutboundContext};
use eventkit_observability::{init_tracing, LogConfig};
use eventkit_pubsub::{
    with_consumer_options, with_queue_subscriber, with_sender_options, with_transformer,
    AddExtension, Protocol,
};
use serde_json::json;

fn main() -> Result<()> {
    init_tracing(&LogConfig::default())?;

    let client = Client::new(&[with_uuids(), with_force_binary()])?;
    let protocol = Protocol::new(
        "orders.created",
        "orders.created",
        &[
            with_consumer_options(vec![with_queue_subscriber("billing")]),
            with_sender_options(vec![with_transformer(Arc::new(AddExtension::new(
                "region", "eu-1",
            )))]),
        ],
    )?;
    println!("queue group: {:?}", protocol.consumer().queue_group());

    let (event, ctx) = client.prepare_outbound(
        Event::new("/demo/orders", "order.created")
            .with_data("application/xml", json!({"sku": "X-1", "qty": "2"})),
    );

    for ctx in [
        ctx,
        OutboundContext {
            encoding: EncodingMode::Structured,
        },
    ] {
        let wire = protocol.outbound(client.codec(), event.clone(), ctx)?;
        println!("── {} ──", ctx.encoding);
        for (name, value) in &wire.headers {
            println!("  {name}: {value}");
        }
        println!("  body: {}", String::from_utf8_lossy(&wire.body));

        let received = protocol.inbound(client.codec(), &wire)?;
        println!("  received id={} data={:?}", received.id, received.data);
    }
    Ok(())
}
