//! File-based protocol settings.

use serde::{Deserialize, Serialize};

use eventkit_core::ConfigError;

use crate::options::{with_consumer_options, with_queue_subscriber};
use crate::protocol::{Protocol, ProtocolOption};

/// Subjects plus an optional queue group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSettings {
    pub send_subject: String,
    pub receive_subject: String,
    /// Join this queue group instead of subscribing directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_group: Option<String>,
}

impl ProtocolSettings {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    pub fn to_options(&self) -> Vec<ProtocolOption> {
        match &self.queue_group {
            Some(queue) => vec![with_consumer_options(vec![with_queue_subscriber(
                queue.clone(),
            )])],
            None => Vec::new(),
        }
    }

    /// Build the protocol; an empty `queue_group` is rejected.
    pub fn build(&self) -> Result<Protocol, ConfigError> {
        Protocol::new(
            self.send_subject.clone(),
            self.receive_subject.clone(),
            &self.to_options(),
        )
    }
}
