//! # eventkit-client
//!
//! Builds an event [`Client`] from an ordered list of [`ClientOption`]s.
//!
//! ```text
//! [ClientOption, ...] ──apply_options──▶ ClientConfig ──▶ Client
//!                                                           │
//!        outgoing Event ──defaulter chain──▶ Event ─────────┤
//!                          decorator chain──▶ OutboundContext
//!                                                           │
//!                      ObservedCodec (registry + observability)
//! ```
//!
//! Options apply strictly in order; the first invalid option aborts
//! construction. Options may also be produced from a [`ClientSettings`] file.

pub mod client;
pub mod config;
pub mod defaulters;
pub mod options;
pub mod settings;

pub use client::Client;
pub use config::{ClientConfig, ClientOption};
pub use defaulters::{default_id_to_uuid_if_not_set, default_time_to_now_if_not_set, EventDefaulter};
pub use options::{
    with_event_defaulter, with_force_binary, with_force_structured, with_observability_service,
    with_poll_concurrency, with_time_now, with_uuids,
};
#[allow(deprecated)]
pub use options::with_trace_propagation;
pub use settings::{ClientSettings, EncodingPreference};
