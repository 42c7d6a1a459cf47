//! File-based client settings.
//!
//! ```yaml
//! encoding: binary        # auto | binary | structured
//! uuids: true
//! time_now: true
//! poll_concurrency: 8     # 0 = platform default
//! ```

use serde::{Deserialize, Serialize};

use eventkit_core::ConfigError;

use crate::config::ClientOption;
use crate::options::{
    with_force_binary, with_force_structured, with_poll_concurrency, with_time_now, with_uuids,
};

/// Outbound encoding requested by a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingPreference {
    /// No decorator; the transport decides.
    #[default]
    Auto,
    Binary,
    Structured,
}

/// Declarative form of the common client options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub encoding: EncodingPreference,
    /// Assign a UUID to events without an id
    #[serde(default = "bool_true")]
    pub uuids: bool,
    /// Stamp the current time on events without one
    #[serde(default = "bool_true")]
    pub time_now: bool,
    #[serde(default)]
    pub poll_concurrency: usize,
}

fn bool_true() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            encoding: EncodingPreference::Auto,
            uuids: true,
            time_now: true,
            poll_concurrency: 0,
        }
    }
}

impl ClientSettings {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    /// Expand into options: defaulters first (uuid, then time), then the
    /// encoding decorator, then concurrency.
    pub fn to_options(&self) -> Vec<ClientOption> {
        let mut options = Vec::new();
        if self.uuids {
            options.push(with_uuids());
        }
        if self.time_now {
            options.push(with_time_now());
        }
        match self.encoding {
            EncodingPreference::Auto => {}
            EncodingPreference::Binary => options.push(with_force_binary()),
            EncodingPreference::Structured => options.push(with_force_structured()),
        }
        options.push(with_poll_concurrency(self.poll_concurrency));
        options
    }
}
