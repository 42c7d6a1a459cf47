//! Protocol construction and sender → consumer round trips.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use eventkit_codec::ObservedCodec;
use eventkit_core::{
    ConfigError, ConfigOption, EncodingMode, Event, OutboundContext, ProtocolError,
};
use eventkit_pubsub::{
    with_consumer_options, with_queue_subscriber, with_sender_options, with_transformer,
    AddExtension, EventTransformer, Protocol, ProtocolConfig, Subscriber, WireMessage,
    RESERVED_ATTRIBUTES, STRUCTURED_CONTENT_TYPE,
};
use serde_json::json;

fn binary() -> OutboundContext {
    OutboundContext {
        encoding: EncodingMode::Binary,
    }
}

fn sample() -> Event {
    Event::new("/orders", "order.created")
        .with_id("evt-1")
        .with_time(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        .with_subject("order/17")
        .with_data("application/json", json!({"qty": 3, "sku": "X-1"}))
}

#[test]
fn protocol_builds_sender_and_consumer_from_stored_options() {
    let protocol = Protocol::new(
        "orders.out",
        "orders.in",
        &[
            with_consumer_options(vec![with_queue_subscriber("workers")]),
            with_sender_options(vec![with_transformer(Arc::new(AddExtension::new(
                "region", "eu",
            )))]),
        ],
    )
    .unwrap();
    assert_eq!(
        *protocol.consumer().subscriber(),
        Subscriber::Queue {
            queue: "workers".into()
        }
    );
    assert_eq!(protocol.sender().transformers().len(), 1);
    assert_eq!(protocol.receive_subject(), "orders.in");
}

#[test]
fn invalid_queue_name_aborts_protocol() {
    let err = Protocol::new(
        "a",
        "b",
        &[with_consumer_options(vec![with_queue_subscriber("")])],
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidQueueName));
}

#[test]
fn failing_protocol_option_skips_the_rest() {
    let reject = ConfigOption::<ProtocolConfig>::new("reject", |_| {
        Err(ConfigError::Invalid {
            option: "reject",
            reason: "test".into(),
        })
    });
    // the queue option after the failure would otherwise be invalid too
    let err = Protocol::new(
        "a",
        "b",
        &[
            with_sender_options(vec![]),
            reject,
            with_consumer_options(vec![with_queue_subscriber("")]),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { option: "reject", .. }));
}

#[test]
fn binary_round_trip_applies_transformers_in_order() {
    let first = EventTransformer::new("stamp", |e: &mut Event| {
        e.extensions.insert("hop".into(), json!("first"));
        Ok(())
    });
    let second = EventTransformer::new("overwrite", |e: &mut Event| {
        e.extensions.insert("hop".into(), json!("second"));
        Ok(())
    });
    let protocol = Protocol::new(
        "orders.out",
        "orders.in",
        &[with_sender_options(vec![
            with_transformer(Arc::new(first)),
            with_transformer(Arc::new(second)),
        ])],
    )
    .unwrap();
    let codec = ObservedCodec::unobserved();

    let wire = protocol.outbound(&codec, sample(), binary()).unwrap();
    assert_eq!(wire.subject, "orders.out");
    assert_eq!(wire.header("ce-id"), Some("evt-1"));
    assert_eq!(wire.header("ce-hop"), Some("second"));
    assert_eq!(wire.header("content-type"), Some("application/json"));
    assert!(!wire.is_structured());

    let back = protocol.inbound(&codec, &wire).unwrap();
    let mut expected = sample();
    expected.extensions.insert("hop".into(), json!("second"));
    assert_eq!(back, expected);
}

#[test]
fn unspecified_encoding_renders_structured() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let codec = ObservedCodec::unobserved();
    let wire = protocol
        .outbound(&codec, sample(), OutboundContext::default())
        .unwrap();
    assert!(wire.is_structured());
    assert_eq!(wire.header("content-type"), Some(STRUCTURED_CONTENT_TYPE));
    let back = protocol.inbound(&codec, &wire).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn xml_payload_in_binary_mode() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let codec = ObservedCodec::unobserved();
    let event = Event::new("/s", "t")
        .with_id("x1")
        .with_data("application/xml", json!({"sku": "X-1"}));
    let wire = protocol.outbound(&codec, event.clone(), binary()).unwrap();
    assert!(std::str::from_utf8(&wire.body)
        .unwrap()
        .contains("<sku>X-1</sku>"));
    let back = protocol.inbound(&codec, &wire).unwrap();
    assert_eq!(back.data, event.data);
}

#[test]
fn transformer_failure_is_returned() {
    let protocol = Protocol::new(
        "s",
        "r",
        &[with_sender_options(vec![with_transformer(Arc::new(
            AddExtension::new("", 1),
        ))])],
    )
    .unwrap();
    let err = protocol
        .outbound(&ObservedCodec::unobserved(), sample(), binary())
        .unwrap_err();
    assert!(matches!(err, ProtocolError::Transform { .. }));
}

#[test]
fn unknown_payload_type_surfaces_codec_error() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let event = Event::new("/s", "t")
        .with_id("1")
        .with_data("text/unknown", json!(1));
    let err = protocol
        .outbound(&ObservedCodec::unobserved(), event, binary())
        .unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Codec(ref e) if e.is_unsupported()
    ));
}

#[test]
fn binary_message_without_id_is_malformed() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let mut headers = indexmap::IndexMap::new();
    headers.insert("ce-source".to_string(), "/s".to_string());
    headers.insert("ce-type".to_string(), "t".to_string());
    let wire = WireMessage {
        subject: "r".into(),
        headers,
        body: bytes::Bytes::new(),
    };
    let err = protocol
        .inbound(&ObservedCodec::unobserved(), &wire)
        .unwrap_err();
    assert!(matches!(err, ProtocolError::Malformed { .. }));
}

#[test]
fn extension_shadowing_a_core_attribute_is_rejected() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let codec = ObservedCodec::unobserved();
    for name in RESERVED_ATTRIBUTES {
        let event = sample().with_extension(name, "garbage");
        for ctx in [binary(), OutboundContext::default()] {
            let err = protocol.outbound(&codec, event.clone(), ctx).unwrap_err();
            assert!(
                matches!(err, ProtocolError::Malformed { ref reason } if reason.contains(name)),
                "{name} in {} mode: {err}",
                ctx.encoding
            );
        }
    }
}

#[test]
fn binary_mode_reads_extensions_back_as_strings() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let codec = ObservedCodec::unobserved();
    let event = sample()
        .with_extension("n", 5)
        .with_extension("flag", true)
        .with_extension("label", "eu");

    let wire = protocol.outbound(&codec, event.clone(), binary()).unwrap();
    assert_eq!(wire.header("ce-n"), Some("5"));
    assert_eq!(wire.header("ce-flag"), Some("true"));

    let back = protocol.inbound(&codec, &wire).unwrap();
    assert_eq!(back.extensions["n"], json!("5"));
    assert_eq!(back.extensions["flag"], json!("true"));
    assert_eq!(back.extensions["label"], json!("eu"));

    // structured mode keeps the JSON types
    let wire = protocol
        .outbound(&codec, event.clone(), OutboundContext::default())
        .unwrap();
    assert_eq!(protocol.inbound(&codec, &wire).unwrap(), event);
}

#[test]
fn xml_lists_survive_binary_mode() {
    let protocol = Protocol::new("s", "r", &[]).unwrap();
    let codec = ObservedCodec::unobserved();
    let event = Event::new("/s", "t")
        .with_id("x2")
        .with_data("application/xml", json!({"sku": ["X-1", "X-2"], "note": ""}));
    let wire = protocol.outbound(&codec, event.clone(), binary()).unwrap();
    let back = protocol.inbound(&codec, &wire).unwrap();
    assert_eq!(back.data, event.data);
}
