//! # eventkit-codec
//!
//! Content-type codec dispatch for EventKit.
//!
//! A [`CodecRegistry`] maps a MIME type to a decode function and an encode
//! function. Lookups are exact string matches; the empty content type is an
//! alias for JSON in [`CodecRegistry::with_defaults`]. Unknown types fail
//! with [`CodecError::UnsupportedContentType`]; codec errors are passed
//! through untouched.
//!
//! [`ObservedCodec`] pairs a registry with an
//! [`ObservabilityService`](eventkit_observability::ObservabilityService) and
//! reports every encode/decode as OK or Error.
//!
//! [`CodecError::UnsupportedContentType`]: eventkit_core::CodecError::UnsupportedContentType

pub mod json;
pub mod observed;
pub mod registry;
pub mod xml;

pub use observed::{ObservedCodec, REPORT_DECODE, REPORT_ENCODE};
pub use registry::{CodecRegistry, DecodeFn, EncodeFn};
