//! Inbound half of the protocol.

use eventkit_codec::ObservedCodec;
use eventkit_core::{apply_options, ConfigError, ConfigOption, Event, ProtocolError};

use crate::message::{from_binary, from_structured, WireMessage};

/// A deferred change to a [`Consumer`].
pub type ConsumerOption = ConfigOption<Consumer>;

/// How the consumer subscribes to its subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Subscriber {
    /// Every consumer receives every message.
    #[default]
    Direct,
    /// Consumers sharing `queue` split the stream between them.
    /// `queue` is never empty.
    Queue { queue: String },
}

/// Receives wire messages and turns them into events.
#[derive(Debug, Clone, Default)]
pub struct Consumer {
    pub(crate) subscriber: Subscriber,
}

impl Consumer {
    pub fn from_options(options: &[ConsumerOption]) -> Result<Self, ConfigError> {
        let mut consumer = Self::default();
        apply_options(&mut consumer, options)?;
        Ok(consumer)
    }

    pub fn subscriber(&self) -> &Subscriber {
        &self.subscriber
    }

    /// Queue group name, if subscribed as a queue member.
    pub fn queue_group(&self) -> Option<&str> {
        match &self.subscriber {
            Subscriber::Direct => None,
            Subscriber::Queue { queue } => Some(queue),
        }
    }

    /// Decode a received message. Structured bodies are recognised by their
    /// content type; everything else is read as binary.
    pub fn to_event(
        &self,
        codec: &ObservedCodec,
        message: &WireMessage,
    ) -> Result<Event, ProtocolError> {
        if message.is_structured() {
            from_structured(codec, message)
        } else {
            from_binary(codec, message)
        }
    }
}
