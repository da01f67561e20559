//! Loopback configuration.
//!
//! Read from an optional TOML file; every field has a default so a partial
//! file (or none at all) is fine.

use std::path::Path;

use photolink_protocol::MessageKeys;
use photolink_transfer::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dictionary keys for the transfer fields.
    #[serde(default)]
    pub keys: MessageKeys,

    /// Payload bytes per message.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Identifier stamped on every message of the transfer.
    #[serde(default = "default_transfer_id")]
    pub transfer_id: u32,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_transfer_id() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: MessageKeys::default(),
            chunk_size: default_chunk_size(),
            transfer_id: default_transfer_id(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or returns defaults when no path is
    /// given or the file does not exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}
