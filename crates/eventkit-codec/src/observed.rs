//! Registry dispatch wrapped in observability reporting.

use std::sync::Arc;

use eventkit_core::CodecError;
use eventkit_observability::{observe, NoopObservability, ObservabilityService};
use serde::{de::DeserializeOwned, Serialize};

use crate::registry::CodecRegistry;

/// Operation name reported for every decode.
pub const REPORT_DECODE: &str = "codec.decode";
/// Operation name reported for every encode.
pub const REPORT_ENCODE: &str = "codec.encode";

/// A [`CodecRegistry`] whose dispatches are reported to an
/// [`ObservabilityService`]. Results and errors are returned unchanged.
#[derive(Clone)]
pub struct ObservedCodec {
    registry: CodecRegistry,
    service: Arc<dyn ObservabilityService>,
}

impl ObservedCodec {
    pub fn new(registry: CodecRegistry, service: Arc<dyn ObservabilityService>) -> Self {
        Self { registry, service }
    }

    /// Default codec table, reports discarded.
    pub fn unobserved() -> Self {
        Self::new(CodecRegistry::with_defaults(), Arc::new(NoopObservability))
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn decode<T: DeserializeOwned>(
        &self,
        content_type: &str,
        source: &[u8],
        destination: &mut T,
    ) -> Result<(), CodecError> {
        observe(self.service.as_ref(), REPORT_DECODE, || {
            self.registry.decode(content_type, source, destination)
        })
    }

    pub fn encode<T: Serialize + ?Sized>(
        &self,
        content_type: &str,
        source: &T,
    ) -> Result<Vec<u8>, CodecError> {
        observe(self.service.as_ref(), REPORT_ENCODE, || {
            self.registry.encode(content_type, source)
        })
    }
}

impl std::fmt::Debug for ObservedCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservedCodec")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
