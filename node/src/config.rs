//! Network configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use airmile_types::TokenType;

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for an in-process AirMile network.
///
/// Can be loaded from a TOML file via [`NetworkConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Name of the notary every transaction names.
    #[serde(default = "default_notary")]
    pub notary: String,

    /// Names of the nodes to start. Keys are derived from the names.
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,

    /// Messages buffered per session direction.
    #[serde(default = "default_session_buffer")]
    pub session_buffer: usize,

    /// How long a session receive waits before timing out.
    #[serde(default = "default_session_timeout_ms")]
    pub session_timeout_ms: u64,

    /// Token identifier used by issuances that do not name one.
    #[serde(default = "default_token_identifier")]
    pub token_identifier: String,

    #[serde(default)]
    pub fraction_digits: u32,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_notary() -> String {
    "Notary".to_string()
}

fn default_nodes() -> Vec<String> {
    ["Alice", "Bob", "Carly", "Dan"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_session_buffer() -> usize {
    16
}

fn default_session_timeout_ms() -> u64 {
    10_000
}

fn default_token_identifier() -> String {
    "AirMile".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NetworkConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }

    pub fn token_type(&self) -> TokenType {
        TokenType::new(self.token_identifier.clone(), self.fraction_digits)
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            notary: default_notary(),
            nodes: default_nodes(),
            session_buffer: default_session_buffer(),
            session_timeout_ms: default_session_timeout_ms(),
            token_identifier: default_token_identifier(),
            fraction_digits: 0,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
