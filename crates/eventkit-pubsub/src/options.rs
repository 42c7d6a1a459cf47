//! Protocol, sender and consumer options.

use std::sync::Arc;

use eventkit_core::ConfigError;

use crate::consumer::{Consumer, ConsumerOption, Subscriber};
use crate::protocol::{ProtocolConfig, ProtocolOption};
use crate::sender::{Sender, SenderOption};
use crate::transformer::TransformerFactory;

/// Options the protocol applies when it builds its [`Consumer`].
/// Replaces any list set earlier.
pub fn with_consumer_options(options: Vec<ConsumerOption>) -> ProtocolOption {
    ProtocolOption::new("with_consumer_options", move |p: &mut ProtocolConfig| {
        p.consumer_options = options.clone();
        Ok(())
    })
}

/// Options the protocol applies when it builds its [`Sender`].
/// Replaces any list set earlier.
pub fn with_sender_options(options: Vec<SenderOption>) -> ProtocolOption {
    ProtocolOption::new("with_sender_options", move |p: &mut ProtocolConfig| {
        p.sender_options = options.clone();
        Ok(())
    })
}

/// Appends a transformer factory to the sender's chain.
pub fn with_transformer(factory: Arc<dyn TransformerFactory>) -> SenderOption {
    SenderOption::new("with_transformer", move |s: &mut Sender| {
        s.transformers.push(Arc::clone(&factory));
        Ok(())
    })
}

/// Subscribe as a member of queue group `queue`.
/// An empty name fails with [`ConfigError::InvalidQueueName`].
pub fn with_queue_subscriber(queue: impl Into<String>) -> ConsumerOption {
    let queue = queue.into();
    ConsumerOption::new("with_queue_subscriber", move |c: &mut Consumer| {
        if queue.is_empty() {
            return Err(ConfigError::InvalidQueueName);
        }
        c.subscriber = Subscriber::Queue {
            queue: queue.clone(),
        };
        Ok(())
    })
}

/// Subscribe directly (every consumer sees every message).
pub fn with_direct_subscriber() -> ConsumerOption {
    ConsumerOption::new("with_direct_subscriber", |c: &mut Consumer| {
        c.subscriber = Subscriber::Direct;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::AddExtension;
    use eventkit_core::apply_options;

    #[test]
    fn empty_queue_name_is_rejected_and_subscriber_kept() {
        let mut consumer = Consumer::default();
        let err = apply_options(&mut consumer, &[with_queue_subscriber("")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidQueueName));
        assert_eq!(err.to_string(), "invalid queue name for queue subscriber");
        assert_eq!(*consumer.subscriber(), Subscriber::Direct);

        let mut consumer = Consumer::from_options(&[with_queue_subscriber("orders")]).unwrap();
        apply_options(&mut consumer, &[with_queue_subscriber("")]).unwrap_err();
        assert_eq!(consumer.queue_group(), Some("orders"));
    }

    #[test]
    fn queue_subscriber_is_installed() {
        let consumer = Consumer::from_options(&[with_queue_subscriber("orders")]).unwrap();
        assert_eq!(
            *consumer.subscriber(),
            Subscriber::Queue {
                queue: "orders".into()
            }
        );
        assert_eq!(consumer.queue_group(), Some("orders"));
    }

    #[test]
    fn subscriber_last_write_wins() {
        let consumer = Consumer::from_options(&[
            with_queue_subscriber("a"),
            with_queue_subscriber("b"),
        ])
        .unwrap();
        assert_eq!(consumer.queue_group(), Some("b"));

        let consumer = Consumer::from_options(&[
            with_queue_subscriber("a"),
            with_direct_subscriber(),
        ])
        .unwrap();
        assert_eq!(*consumer.subscriber(), Subscriber::Direct);
    }

    #[test]
    fn default_consumer_is_direct() {
        let consumer = Consumer::from_options(&[]).unwrap();
        assert_eq!(consumer.queue_group(), None);
    }

    #[test]
    fn transformers_append_in_order() {
        let sender = Sender::from_options(&[
            with_transformer(Arc::new(AddExtension::new("a", 1))),
            with_transformer(Arc::new(AddExtension::new("b", 2))),
        ])
        .unwrap();
        assert_eq!(sender.transformers().len(), 2);
    }

    #[test]
    fn protocol_option_lists_replace() {
        let mut config = ProtocolConfig::default();
        apply_options(
            &mut config,
            &[
                with_consumer_options(vec![with_queue_subscriber("a")]),
                with_consumer_options(vec![with_direct_subscriber(), with_queue_subscriber("b")]),
            ],
        )
        .unwrap();
        let names: Vec<_> = config.consumer_options().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["with_direct_subscriber", "with_queue_subscriber"]);
        assert!(config.sender_options().is_empty());
    }
}
