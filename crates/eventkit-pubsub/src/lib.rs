//! # eventkit-pubsub
//!
//! Subject-based publish/subscribe adapter for EventKit.
//!
//! A [`Protocol`] is configured with [`ProtocolOption`]s that carry the
//! option lists for its [`Sender`] and [`Consumer`]:
//!
//! ```text
//! ProtocolOption ──▶ ProtocolConfig { consumer_options, sender_options }
//!                         │                     │
//!                         ▼                     ▼
//!                  Consumer { Subscriber }   Sender { transformers }
//! ```
//!
//! The sender renders outgoing events into [`WireMessage`]s (binary or
//! structured); the consumer turns received wire messages back into events.
//! Connection handling and delivery belong to the underlying client library.

pub mod consumer;
pub mod message;
pub mod options;
pub mod protocol;
pub mod sender;
pub mod settings;
pub mod transformer;

pub use consumer::{Consumer, ConsumerOption, Subscriber};
pub use message::{WireMessage, RESERVED_ATTRIBUTES, STRUCTURED_CONTENT_TYPE};
pub use options::{
    with_consumer_options, with_direct_subscriber, with_queue_subscriber, with_sender_options,
    with_transformer,
};
pub use protocol::{Protocol, ProtocolConfig, ProtocolOption};
pub use sender::{Sender, SenderOption};
pub use settings::ProtocolSettings;
pub use transformer::{AddExtension, EventTransformer, Transformer, TransformerFactory};
