//! The configured event client.

use std::num::NonZeroUsize;
use std::sync::Arc;

use eventkit_codec::{CodecRegistry, ObservedCodec};
use eventkit_core::{CodecError, ConfigError, Event, OutboundContext};
use eventkit_observability::{NoopObservability, ObservabilityService};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::{ClientConfig, ClientOption};

/// An event client built from an ordered option list.
///
/// The configuration is frozen at construction; a `Client` can be shared
/// across threads by reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    codec: ObservedCodec,
}

impl Client {
    /// Build a client over the default codec table.
    pub fn new(options: &[ClientOption]) -> Result<Self, ConfigError> {
        Self::with_registry(CodecRegistry::with_defaults(), options)
    }

    /// Build a client that dispatches payloads through `registry`.
    pub fn with_registry(
        registry: CodecRegistry,
        options: &[ClientOption],
    ) -> Result<Self, ConfigError> {
        let config = ClientConfig::from_options(options)?;
        let service: Arc<dyn ObservabilityService> = match config.observability() {
            Some(service) => Arc::clone(service),
            None => Arc::new(NoopObservability),
        };
        info!(
            options = options.len(),
            defaulters = config.event_defaulters().len(),
            decorators = config.outbound_decorators().len(),
            poll_concurrency = config.poll_concurrency(),
            "client configured"
        );
        Ok(Self {
            codec: ObservedCodec::new(registry, service),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Worker count for inbound polling, resolving 0 to the available
    /// parallelism of the host.
    pub fn poll_concurrency(&self) -> usize {
        match self.config.poll_concurrency() {
            0 => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            n => n,
        }
    }

    /// Run the defaulter chain over `event` in registration order.
    pub fn apply_defaults(&self, event: Event) -> Event {
        self.config
            .event_defaulters()
            .iter()
            .fold(event, |event, d| d.apply(event))
    }

    /// Effective outbound settings after folding the decorator chain.
    pub fn outbound_context(&self) -> OutboundContext {
        self.config.outbound_context()
    }

    /// Defaulted event plus the context it should be sent with.
    pub fn prepare_outbound(&self, event: Event) -> (Event, OutboundContext) {
        (self.apply_defaults(event), self.outbound_context())
    }

    /// Encode `event.data` with the codec selected by its content type.
    /// An event without data encodes to an empty payload.
    pub fn encode_data(&self, event: &Event) -> Result<Vec<u8>, CodecError> {
        match &event.data {
            Some(data) => self.codec.encode(event.content_type(), data),
            None => Ok(Vec::new()),
        }
    }

    /// Decode a payload received with `content_type` into `destination`.
    pub fn decode_data<T: DeserializeOwned>(
        &self,
        content_type: &str,
        payload: &[u8],
        destination: &mut T,
    ) -> Result<(), CodecError> {
        self.codec.decode(content_type, payload, destination)
    }

    pub fn codec(&self) -> &ObservedCodec {
        &self.codec
    }
}
