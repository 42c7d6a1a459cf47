//! Event defaulters: functions that fill in a missing event attribute.

use std::sync::Arc;

use chrono::Utc;
use eventkit_core::Event;
use uuid::Uuid;

type DefaultFn = dyn Fn(Event) -> Event + Send + Sync;

/// A named `Event -> Event` function run on every outgoing event.
#[derive(Clone)]
pub struct EventDefaulter {
    name: &'static str,
    apply: Arc<DefaultFn>,
}

impl EventDefaulter {
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(Event) -> Event + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, event: Event) -> Event {
        (self.apply)(event)
    }
}

impl std::fmt::Debug for EventDefaulter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EventDefaulter").field(&self.name).finish()
    }
}

/// Assigns a random UUID v4 when the event has no id.
pub fn default_id_to_uuid_if_not_set() -> EventDefaulter {
    EventDefaulter::new("default_id_to_uuid_if_not_set", |mut event| {
        if !event.has_id() {
            event.id = Uuid::new_v4().to_string();
        }
        event
    })
}

/// Stamps the current UTC time when the event has no time.
pub fn default_time_to_now_if_not_set() -> EventDefaulter {
    EventDefaulter::new("default_time_to_now_if_not_set", |mut event| {
        if event.time.is_none() {
            event.time = Some(Utc::now());
        }
        event
    })
}
