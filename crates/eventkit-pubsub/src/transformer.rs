//! Transformers applied by the sender before an event is rendered.

use std::sync::Arc;

use eventkit_core::{EncodingMode, Event, ProtocolError};
use serde_json::Value;

/// Mutates an outgoing event.
pub trait Transformer: Send + Sync {
    fn transform(&self, event: &mut Event) -> Result<(), ProtocolError>;
}

/// Produces the transformer to use for a given encoding, or `None` when the
/// factory does not apply to that encoding.
pub trait TransformerFactory: Send + Sync {
    fn name(&self) -> &'static str;

    fn for_encoding(&self, encoding: EncodingMode) -> Option<Arc<dyn Transformer>>;
}

// ─── Closure transformer ──────────────────────────────────────────────────────

type TransformFn = dyn Fn(&mut Event) -> Result<(), ProtocolError> + Send + Sync;

/// Wraps a closure; applies to every encoding.
#[derive(Clone)]
pub struct EventTransformer {
    name: &'static str,
    f: Arc<TransformFn>,
}

impl EventTransformer {
    pub fn new<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&mut Event) -> Result<(), ProtocolError> + Send + Sync + 'static,
    {
        Self { name, f: Arc::new(f) }
    }
}

impl Transformer for EventTransformer {
    fn transform(&self, event: &mut Event) -> Result<(), ProtocolError> {
        (self.f)(event)
    }
}

impl TransformerFactory for EventTransformer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn for_encoding(&self, _encoding: EncodingMode) -> Option<Arc<dyn Transformer>> {
        Some(Arc::new(self.clone()))
    }
}

// ─── Extension setter ─────────────────────────────────────────────────────────

/// Sets (or replaces) one extension attribute.
#[derive(Debug, Clone)]
pub struct AddExtension {
    name: String,
    value: Value,
}

impl AddExtension {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Transformer for AddExtension {
    fn transform(&self, event: &mut Event) -> Result<(), ProtocolError> {
        if self.name.is_empty() {
            return Err(ProtocolError::Transform {
                transformer: "add_extension",
                reason: "extension name is empty".into(),
            });
        }
        event.extensions.insert(self.name.clone(), self.value.clone());
        Ok(())
    }
}

impl TransformerFactory for AddExtension {
    fn name(&self) -> &'static str {
        "add_extension"
    }

    fn for_encoding(&self, _encoding: EncodingMode) -> Option<Arc<dyn Transformer>> {
        Some(Arc::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_extension_replaces_value() {
        let mut event = Event::new("/s", "t").with_extension("region", "us");
        AddExtension::new("region", "eu").transform(&mut event).unwrap();
        assert_eq!(event.extensions["region"], "eu");
    }

    #[test]
    fn empty_extension_name_fails() {
        let mut event = Event::new("/s", "t");
        let err = AddExtension::new("", 1).transform(&mut event).unwrap_err();
        assert!(matches!(err, ProtocolError::Transform { .. }));
    }
}
