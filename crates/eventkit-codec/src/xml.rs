//! XML codec.
//!
//! Payloads must be JSON objects; each key becomes a child of an `<event>`
//! root on encode. Decoding builds the value back element by element:
//!
//! - an element holding only text reads back as that text, so
//!   `<event><id>42</id></event>` becomes `{"id": "42"}`;
//! - an empty element reads back as `""`;
//! - sibling elements sharing a name are gathered into an array, in document
//!   order;
//! - attributes become `@name` keys and text mixed with child elements is kept
//!   under `$text`.
//!
//! XML carries no scalar types: numbers and booleans come back as strings.
//! A one-element array reads back as its single item and an empty array
//! disappears, since neither is distinguishable from a plain field on the wire.

use eventkit_core::CodecError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

pub const CONTENT_TYPE: &str = "application/xml";

/// Root element written by [`encode`].
pub const ROOT: &str = "event";

const TEXT_KEY: &str = "$text";
const ATTR_PREFIX: char = '@';

pub fn decode(source: &[u8]) -> Result<Value, CodecError> {
    let text = std::str::from_utf8(source).map_err(xml_error)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                ensure_single_root(&root)?;
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root)?;
                let element = Element::open(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CodecError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(t) => {
                let chunk = t.unescape().map_err(xml_error)?;
                push_text(&mut stack, &chunk)?;
            }
            Event::CData(c) => {
                let chunk = std::str::from_utf8(&c).map_err(xml_error)?;
                push_text(&mut stack, chunk)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CodecError::Xml("unexpected end of document".into()));
    }
    root.ok_or_else(|| CodecError::Xml("document has no root element".into()))
}

/// Encode an object payload under the `<event>` root.
///
/// Anything other than an object has no single-root XML form and is rejected.
pub fn encode(source: &Value) -> Result<Vec<u8>, CodecError> {
    if !source.is_object() {
        return Err(CodecError::Xml(format!(
            "payload must be an object to encode as XML, got {}",
            kind(source)
        )));
    }
    quick_xml::se::to_string_with_root(ROOT, source)
        .map(String::into_bytes)
        .map_err(xml_error)
}

/// An element whose end tag has not been seen yet.
struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, CodecError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(xml_error)?
            .to_string();
        let mut children = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(xml_error)?;
            let value = attr.unescape_value().map_err(xml_error)?;
            children.insert(
                format!("{ATTR_PREFIX}{key}"),
                Value::String(value.into_owned()),
            );
        }
        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            return Value::String(self.text);
        }
        let mut children = self.children;
        if !self.text.is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        Value::Object(children)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Value>, element: Element) {
    let name = element.name.clone();
    let value = element.into_value();
    let Some(parent) = stack.last_mut() else {
        *root = Some(value);
        return;
    };
    // Element values are never arrays, so an array here means the name repeated.
    match parent.children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.children.insert(name, value);
        }
    }
}

fn push_text(stack: &mut [Element], chunk: &str) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(chunk);
            Ok(())
        }
        None => Err(CodecError::Xml(format!(
            "text outside the root element: {chunk:?}"
        ))),
    }
}

fn ensure_single_root(root: &Option<Value>) -> Result<(), CodecError> {
    match root {
        Some(_) => Err(CodecError::Xml("document has more than one root element".into())),
        None => Ok(()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn xml_error(e: impl std::fmt::Display) -> CodecError {
    CodecError::Xml(e.to_string())
}
