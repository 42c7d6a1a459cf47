//! Outbound half of the protocol.

use std::sync::Arc;

use eventkit_codec::ObservedCodec;
use eventkit_core::{
    apply_options, ConfigError, ConfigOption, EncodingMode, Event, OutboundContext, ProtocolError,
};
use tracing::trace;

use crate::message::{to_binary, to_structured, WireMessage};
use crate::transformer::TransformerFactory;

/// A deferred change to a [`Sender`].
pub type SenderOption = ConfigOption<Sender>;

/// Renders outgoing events into wire messages.
#[derive(Clone, Default)]
pub struct Sender {
    pub(crate) transformers: Vec<Arc<dyn TransformerFactory>>,
}

impl Sender {
    pub fn from_options(options: &[SenderOption]) -> Result<Self, ConfigError> {
        let mut sender = Self::default();
        apply_options(&mut sender, options)?;
        Ok(sender)
    }

    pub fn transformers(&self) -> &[Arc<dyn TransformerFactory>] {
        &self.transformers
    }

    /// Apply the transformer chain in registration order, then render.
    ///
    /// An unspecified encoding renders structured.
    pub fn to_wire(
        &self,
        codec: &ObservedCodec,
        subject: &str,
        mut event: Event,
        ctx: OutboundContext,
    ) -> Result<WireMessage, ProtocolError> {
        let encoding = match ctx.encoding {
            EncodingMode::Unspecified => EncodingMode::Structured,
            mode => mode,
        };
        for factory in &self.transformers {
            if let Some(transformer) = factory.for_encoding(encoding) {
                trace!(transformer = factory.name(), %encoding, "transform");
                transformer.transform(&mut event)?;
            }
        }
        match encoding {
            EncodingMode::Binary => to_binary(codec, subject, &event),
            _ => to_structured(codec, subject, &event),
        }
    }
}

impl std::fmt::Debug for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.transformers.iter().map(|t| t.name()).collect();
        f.debug_struct("Sender").field("transformers", &names).finish()
    }
}
