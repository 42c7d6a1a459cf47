//! In-memory codec registry.
//!
//! Thread-safe via `Arc<RwLock<Inner>>`. Dispatch takes the read lock only
//! long enough to clone the codec handle; the codec itself runs unlocked.
//! Registration is allowed until [`CodecRegistry::freeze`] is called.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use eventkit_core::{CodecError, Direction};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{json, xml};

/// Decodes raw payload bytes into the JSON data model.
pub type DecodeFn = Arc<dyn Fn(&[u8]) -> Result<Value, CodecError> + Send + Sync>;
/// Encodes a JSON data model value into payload bytes.
pub type EncodeFn = Arc<dyn Fn(&Value) -> Result<Vec<u8>, CodecError> + Send + Sync>;

#[derive(Default)]
struct Inner {
    decoders: HashMap<String, DecodeFn>,
    encoders: HashMap<String, EncodeFn>,
    frozen: bool,
}

impl Inner {
    fn check_open(&self, content_type: &str, direction: Direction) -> Result<(), CodecError> {
        if self.frozen {
            return Err(CodecError::RegistryFrozen {
                content_type: content_type.to_string(),
                direction,
            });
        }
        Ok(())
    }
}

/// Content type → codec table, one map per direction.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl CodecRegistry {
    /// An empty registry. Every lookup fails until codecs are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the startup table:
    ///
    /// | key                | codec |
    /// |--------------------|-------|
    /// | `""`               | JSON  |
    /// | `application/json` | JSON  |
    /// | `application/xml`  | XML   |
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        {
            let mut inner = registry.write();
            for key in ["", json::CONTENT_TYPE] {
                inner
                    .decoders
                    .insert(key.to_string(), Arc::new(json::decode) as DecodeFn);
                inner
                    .encoders
                    .insert(key.to_string(), Arc::new(json::encode) as EncodeFn);
            }
            inner
                .decoders
                .insert(xml::CONTENT_TYPE.to_string(), Arc::new(xml::decode) as DecodeFn);
            inner
                .encoders
                .insert(xml::CONTENT_TYPE.to_string(), Arc::new(xml::encode) as EncodeFn);
        }
        registry
    }

    /// Register (or replace) the decoder for `content_type`.
    pub fn add_decoder<F>(
        &self,
        content_type: impl Into<String>,
        decoder: F,
    ) -> Result<(), CodecError>
    where
        F: Fn(&[u8]) -> Result<Value, CodecError> + Send + Sync + 'static,
    {
        let content_type = content_type.into();
        let mut inner = self.write();
        inner.check_open(&content_type, Direction::Decode)?;
        if inner
            .decoders
            .insert(content_type.clone(), Arc::new(decoder))
            .is_some()
        {
            warn!(content_type = %content_type, "decoder replaced");
        } else {
            debug!(content_type = %content_type, "decoder registered");
        }
        Ok(())
    }

    /// Register (or replace) the encoder for `content_type`.
    pub fn add_encoder<F>(
        &self,
        content_type: impl Into<String>,
        encoder: F,
    ) -> Result<(), CodecError>
    where
        F: Fn(&Value) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
    {
        let content_type = content_type.into();
        let mut inner = self.write();
        inner.check_open(&content_type, Direction::Encode)?;
        if inner
            .encoders
            .insert(content_type.clone(), Arc::new(encoder))
            .is_some()
        {
            warn!(content_type = %content_type, "encoder replaced");
        } else {
            debug!(content_type = %content_type, "encoder registered");
        }
        Ok(())
    }

    /// Decode `source` with the codec registered for `content_type`.
    pub fn decode_raw(&self, content_type: &str, source: &[u8]) -> Result<Value, CodecError> {
        let decoder = self
            .read()
            .decoders
            .get(content_type)
            .cloned()
            .ok_or_else(|| unsupported(content_type, Direction::Decode))?;
        trace!(content_type, len = source.len(), "decode");
        decoder(source)
    }

    /// Decode `source` into `destination`.
    ///
    /// `destination` is only written when decoding succeeds.
    pub fn decode<T: DeserializeOwned>(
        &self,
        content_type: &str,
        source: &[u8],
        destination: &mut T,
    ) -> Result<(), CodecError> {
        let value = self.decode_raw(content_type, source)?;
        *destination = serde_json::from_value(value)?;
        Ok(())
    }

    /// Encode `source` with the codec registered for `content_type`.
    pub fn encode_raw(&self, content_type: &str, source: &Value) -> Result<Vec<u8>, CodecError> {
        let encoder = self
            .read()
            .encoders
            .get(content_type)
            .cloned()
            .ok_or_else(|| unsupported(content_type, Direction::Encode))?;
        trace!(content_type, "encode");
        encoder(source)
    }

    /// Encode any serializable value.
    pub fn encode<T: Serialize + ?Sized>(
        &self,
        content_type: &str,
        source: &T,
    ) -> Result<Vec<u8>, CodecError> {
        // Checked before converting so an unknown type never reports a JSON error.
        if !self.contains(Direction::Encode, content_type) {
            return Err(unsupported(content_type, Direction::Encode));
        }
        let value = serde_json::to_value(source)?;
        self.encode_raw(content_type, &value)
    }

    /// Returns `true` if a codec is registered for `content_type`.
    pub fn contains(&self, direction: Direction, content_type: &str) -> bool {
        let inner = self.read();
        match direction {
            Direction::Decode => inner.decoders.contains_key(content_type),
            Direction::Encode => inner.encoders.contains_key(content_type),
        }
    }

    /// Registered content types for one direction, sorted.
    pub fn content_types(&self, direction: Direction) -> Vec<String> {
        let inner = self.read();
        let mut keys: Vec<String> = match direction {
            Direction::Decode => inner.decoders.keys().cloned().collect(),
            Direction::Encode => inner.encoders.keys().cloned().collect(),
        };
        keys.sort();
        keys
    }

    /// Make the registry read-only. Later registrations fail with
    /// [`CodecError::RegistryFrozen`]; dispatch is unaffected.
    pub fn freeze(&self) {
        self.write().frozen = true;
        debug!("codec registry frozen");
    }

    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("decoders", &self.content_types(Direction::Decode))
            .field("encoders", &self.content_types(Direction::Encode))
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

fn unsupported(content_type: &str, direction: Direction) -> CodecError {
    CodecError::UnsupportedContentType {
        content_type: content_type.to_string(),
        direction,
    }
}
