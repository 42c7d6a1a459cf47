//! Client configuration assembled by [`ClientOption`]s.

use std::sync::Arc;

use eventkit_core::{apply_options, ConfigError, ConfigOption, ContextDecorator, OutboundContext};
use eventkit_observability::ObservabilityService;

use crate::defaulters::EventDefaulter;

/// A deferred change to a [`ClientConfig`].
pub type ClientOption = ConfigOption<ClientConfig>;

/// Everything a [`Client`](crate::Client) is configured with.
///
/// Mutated only while options are applied; the client keeps it read-only.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub(crate) event_defaulters: Vec<EventDefaulter>,
    pub(crate) outbound_decorators: Vec<ContextDecorator>,
    /// 0 = use the platform default
    pub(crate) poll_concurrency: usize,
    pub(crate) observability: Option<Arc<dyn ObservabilityService>>,
}

impl ClientConfig {
    /// Apply `options` to an empty configuration.
    pub fn from_options(options: &[ClientOption]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        apply_options(&mut config, options)?;
        Ok(config)
    }

    pub fn event_defaulters(&self) -> &[EventDefaulter] {
        &self.event_defaulters
    }

    pub fn outbound_decorators(&self) -> &[ContextDecorator] {
        &self.outbound_decorators
    }

    /// Configured width, 0 meaning "platform default".
    pub fn poll_concurrency(&self) -> usize {
        self.poll_concurrency
    }

    pub fn observability(&self) -> Option<&Arc<dyn ObservabilityService>> {
        self.observability.as_ref()
    }

    /// Fold the decorator chain over a default context.
    pub fn outbound_context(&self) -> OutboundContext {
        self.outbound_decorators
            .iter()
            .fold(OutboundContext::default(), |ctx, d| d.decorate(ctx))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("event_defaulters", &self.event_defaulters)
            .field("outbound_decorators", &self.outbound_decorators)
            .field("poll_concurrency", &self.poll_concurrency)
            .field("observability", &self.observability.is_some())
            .finish()
    }
}
