//! Wire message representation and the binary/structured mappings.
//!
//! Binary mode carries attributes as `ce-` headers and `data` as the body.
//! Structured mode carries the whole event as a JSON document.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use eventkit_codec::{json, ObservedCodec};
use eventkit_core::{Event, ProtocolError};
use indexmap::IndexMap;
use serde_json::Value;

/// Content type of a structured-mode body.
pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

const CONTENT_TYPE: &str = "content-type";
const PREFIX: &str = "ce-";

/// Attribute names an extension may not take.
pub const RESERVED_ATTRIBUTES: [&str; 8] = [
    "specversion",
    "id",
    "source",
    "type",
    "time",
    "subject",
    "datacontenttype",
    "data",
];

/// A message as handed to, or received from, the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WireMessage {
    pub subject: String,
    pub headers: IndexMap<String, String>,
    pub body: Bytes,
}

impl WireMessage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn is_structured(&self) -> bool {
        self.header(CONTENT_TYPE)
            .map(|ct| ct.starts_with(STRUCTURED_CONTENT_TYPE))
            .unwrap_or(false)
    }
}

/// Extensions shadowing a core attribute would overwrite it on the wire.
fn check_extensions(event: &Event) -> Result<(), ProtocolError> {
    match event
        .extensions
        .keys()
        .find(|name| RESERVED_ATTRIBUTES.contains(&name.as_str()))
    {
        Some(name) => Err(ProtocolError::Malformed {
            reason: format!("extension {name:?} collides with a core attribute"),
        }),
        None => Ok(()),
    }
}

pub(crate) fn to_structured(
    codec: &ObservedCodec,
    subject: &str,
    event: &Event,
) -> Result<WireMessage, ProtocolError> {
    check_extensions(event)?;
    let body = codec.encode(json::CONTENT_TYPE, event)?;
    let mut headers = IndexMap::new();
    headers.insert(CONTENT_TYPE.to_string(), STRUCTURED_CONTENT_TYPE.to_string());
    Ok(WireMessage {
        subject: subject.to_string(),
        headers,
        body: Bytes::from(body),
    })
}

/// Headers carry text only, so extension values are written as strings:
/// a string as-is, anything else as its JSON text. The receiving side reads
/// every extension back as a string (`5` arrives as `"5"`).
pub(crate) fn to_binary(
    codec: &ObservedCodec,
    subject: &str,
    event: &Event,
) -> Result<WireMessage, ProtocolError> {
    check_extensions(event)?;
    let mut headers = IndexMap::new();
    headers.insert(format!("{PREFIX}specversion"), event.spec_version.clone());
    headers.insert(format!("{PREFIX}id"), event.id.clone());
    headers.insert(format!("{PREFIX}source"), event.source.clone());
    headers.insert(format!("{PREFIX}type"), event.ty.clone());
    if let Some(time) = &event.time {
        headers.insert(format!("{PREFIX}time"), time.to_rfc3339());
    }
    if let Some(subject) = &event.subject {
        headers.insert(format!("{PREFIX}subject"), subject.clone());
    }
    for (name, value) in &event.extensions {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        headers.insert(format!("{PREFIX}{name}"), text);
    }
    if let Some(ct) = &event.data_content_type {
        headers.insert(CONTENT_TYPE.to_string(), ct.clone());
    }
    let body = match &event.data {
        Some(data) => codec.encode(event.content_type(), data)?,
        None => Vec::new(),
    };
    Ok(WireMessage {
        subject: subject.to_string(),
        headers,
        body: Bytes::from(body),
    })
}

pub(crate) fn from_structured(
    codec: &ObservedCodec,
    message: &WireMessage,
) -> Result<Event, ProtocolError> {
    let mut event = Event::new("", "");
    codec.decode(json::CONTENT_TYPE, &message.body, &mut event)?;
    Ok(event)
}

pub(crate) fn from_binary(
    codec: &ObservedCodec,
    message: &WireMessage,
) -> Result<Event, ProtocolError> {
    let required = |name: &'static str| {
        message
            .header(&format!("{PREFIX}{name}"))
            .map(str::to_string)
            .ok_or_else(|| ProtocolError::Malformed {
                reason: format!("missing {PREFIX}{name} header"),
            })
    };
    let mut event = Event::new(required("source")?, required("type")?);
    event.id = required("id")?;
    if let Some(version) = message.header("ce-specversion") {
        event.spec_version = version.to_string();
    }

    for (name, value) in &message.headers {
        let Some(attr) = name.strip_prefix(PREFIX) else {
            continue;
        };
        match attr {
            "id" | "source" | "type" | "specversion" => {}
            "time" => {
                let time = DateTime::parse_from_rfc3339(value).map_err(|e| {
                    ProtocolError::Malformed {
                        reason: format!("bad ce-time {value:?}: {e}"),
                    }
                })?;
                event.time = Some(time.with_timezone(&Utc));
            }
            "subject" => event.subject = Some(value.clone()),
            ext => {
                event
                    .extensions
                    .insert(ext.to_string(), Value::String(value.clone()));
            }
        }
    }

    event.data_content_type = message.header(CONTENT_TYPE).map(str::to_string);
    if !message.body.is_empty() {
        let mut data = Value::Null;
        codec.decode(event.content_type(), &message.body, &mut data)?;
        event.data = Some(data);
    }
    Ok(event)
}
