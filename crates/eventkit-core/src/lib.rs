//! # eventkit-core
//!
//! Core types shared across all EventKit crates.
//! The codec registry, the client builder and the pub/sub protocol adapter
//! are all built on top of the interfaces defined here:
//!
//! - [`Event`] — the event envelope carried by every transport
//! - [`ConfigOption`] / [`apply_options`] — ordered, fail-fast configuration
//! - [`EncodingMode`] / [`ContextDecorator`] — outbound encoding selection
//! - [`CodecError`], [`ConfigError`], [`ProtocolError`] — error taxonomy

pub mod encoding;
pub mod error;
pub mod event;
pub mod option;

pub use encoding::{ContextDecorator, EncodingMode, OutboundContext};
pub use error::{CodecError, ConfigError, Direction, ProtocolError};
pub use event::{Event, SPEC_VERSION};
pub use option::{apply_options, ConfigOption};
