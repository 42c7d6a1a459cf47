//! Error types for codec dispatch, option application and the pub/sub adapter.

use thiserror::Error;

/// Which half of the codec table an operation consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Decode,
    Encode,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Encode => write!(f, "encode"),
        }
    }
}

/// Errors raised while encoding or decoding an event payload.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("[{direction}] unsupported content type: {content_type:?}")]
    UnsupportedContentType {
        content_type: String,
        direction: Direction,
    },

    #[error("[{direction}] registry is frozen, cannot register {content_type:?}")]
    RegistryFrozen {
        content_type: String,
        direction: Direction,
    },

    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML codec error: {0}")]
    Xml(String),

    #[error("{0}")]
    Other(String),
}

impl CodecError {
    /// Returns `true` if no codec is registered for the requested content type.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedContentType { .. })
    }
}

/// Errors raised while applying configuration options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("client option was given a missing event defaulter")]
    MissingDefaulter,

    #[error("invalid queue name for queue subscriber")]
    InvalidQueueName,

    #[error("invalid option {option}: {reason}")]
    Invalid { option: &'static str, reason: String },

    /// Settings file could not be read or parsed.
    #[error("settings error: {0}")]
    Settings(String),
}

impl ConfigError {
    /// Returns `true` if an option rejected its input during construction.
    pub fn is_invalid_configuration(&self) -> bool {
        !matches!(self, Self::Settings(_))
    }
}

/// Errors from the pub/sub protocol adapter.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("transformer {transformer} failed: {reason}")]
    Transform {
        transformer: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("malformed message: {reason}")]
    Malformed { reason: String },
}
