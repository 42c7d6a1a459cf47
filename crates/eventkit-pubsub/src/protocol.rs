//! The configured protocol: a sender/consumer pair bound to two subjects.

use eventkit_codec::ObservedCodec;
use eventkit_core::{
    apply_options, ConfigError, ConfigOption, Event, OutboundContext, ProtocolError,
};
use tracing::info;

use crate::consumer::{Consumer, ConsumerOption};
use crate::message::WireMessage;
use crate::sender::{Sender, SenderOption};

/// A deferred change to a [`ProtocolConfig`].
pub type ProtocolOption = ConfigOption<ProtocolConfig>;

/// Option lists held until the sender and consumer are built.
#[derive(Debug, Clone, Default)]
pub struct ProtocolConfig {
    pub(crate) consumer_options: Vec<ConsumerOption>,
    pub(crate) sender_options: Vec<SenderOption>,
}

impl ProtocolConfig {
    pub fn consumer_options(&self) -> &[ConsumerOption] {
        &self.consumer_options
    }

    pub fn sender_options(&self) -> &[SenderOption] {
        &self.sender_options
    }
}

/// Publishes to `send_subject`, consumes from `receive_subject`.
#[derive(Debug, Clone)]
pub struct Protocol {
    send_subject: String,
    receive_subject: String,
    sender: Sender,
    consumer: Consumer,
}

impl Protocol {
    /// Apply `options`, then build the consumer and the sender from the
    /// option lists they left behind. The first invalid option aborts.
    pub fn new(
        send_subject: impl Into<String>,
        receive_subject: impl Into<String>,
        options: &[ProtocolOption],
    ) -> Result<Self, ConfigError> {
        let mut config = ProtocolConfig::default();
        apply_options(&mut config, options)?;
        let consumer = Consumer::from_options(&config.consumer_options)?;
        let sender = Sender::from_options(&config.sender_options)?;

        let protocol = Self {
            send_subject: send_subject.into(),
            receive_subject: receive_subject.into(),
            sender,
            consumer,
        };
        info!(
            send_subject = %protocol.send_subject,
            receive_subject = %protocol.receive_subject,
            queue_group = protocol.consumer.queue_group().unwrap_or(""),
            transformers = protocol.sender.transformers().len(),
            "protocol configured"
        );
        Ok(protocol)
    }

    pub fn send_subject(&self) -> &str {
        &self.send_subject
    }

    pub fn receive_subject(&self) -> &str {
        &self.receive_subject
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    /// Render `event` for publication on the send subject.
    pub fn outbound(
        &self,
        codec: &ObservedCodec,
        event: Event,
        ctx: OutboundContext,
    ) -> Result<WireMessage, ProtocolError> {
        self.sender.to_wire(codec, &self.send_subject, event, ctx)
    }

    /// Decode a message received on the receive subject.
    pub fn inbound(
        &self,
        codec: &ObservedCodec,
        message: &WireMessage,
    ) -> Result<Event, ProtocolError> {
        self.consumer.to_event(codec, message)
    }
}
