//! The event envelope carried by every transport.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope version stamped on events created by [`Event::new`].
pub const SPEC_VERSION: &str = "1.0";

/// An event: routing attributes plus an optional JSON payload.
///
/// Attribute names on the wire follow the CloudEvents JSON format
/// (`specversion`, `datacontenttype`, ...). Unknown top-level attributes are
/// kept as extensions in the order they were received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique id; empty until set explicitly or by a defaulter
    #[serde(default)]
    pub id: String,
    /// URI-reference identifying the producer
    pub source: String,
    /// Event type, e.g. "com.example.order.created"
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "specversion", default = "default_spec_version")]
    pub spec_version: String,
    /// Occurrence time (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// MIME type of `data`; `None` selects the default codec
    #[serde(
        rename = "datacontenttype",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Extension attributes, insertion-ordered
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

fn default_spec_version() -> String {
    SPEC_VERSION.to_string()
}

impl Event {
    /// Create an event with the two mandatory producer attributes.
    pub fn new(source: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            source: source.into(),
            ty: ty.into(),
            spec_version: default_spec_version(),
            time: None,
            data_content_type: None,
            subject: None,
            data: None,
            extensions: IndexMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attach a payload together with its content type.
    pub fn with_data(mut self, content_type: impl Into<String>, data: Value) -> Self {
        self.data_content_type = Some(content_type.into());
        self.data = Some(data);
        self
    }

    /// Add an extension attribute (appended after existing ones).
    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    /// Content type used to pick a codec; empty string when unset.
    pub fn content_type(&self) -> &str {
        self.data_content_type.as_deref().unwrap_or("")
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_attribute_names() {
        let event = Event::new("/orders", "order.created")
            .with_id("A-1")
            .with_data("application/json", json!({"total": 12}));
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["type"], "order.created");
        assert_eq!(v["specversion"], "1.0");
        assert_eq!(v["datacontenttype"], "application/json");
        assert!(v.get("time").is_none());
    }

    #[test]
    fn extensions_keep_order_through_json() {
        let event = Event::new("/s", "t")
            .with_extension("zeta", 1)
            .with_extension("alpha", "two");
        let text = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&text).unwrap();
        let names: Vec<&str> = back.extensions.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(back, event);
    }

    #[test]
    fn missing_content_type_is_empty_key() {
        let event = Event::new("/s", "t");
        assert_eq!(event.content_type(), "");
        assert!(!event.has_id());
    }
}
