//! Configuration types for StudyMate.
//!
//! `GlobalConfig` is the optional `config.toml` in the data directory and
//! tunes request parameters and import pacing. `ApiConfig` holds the remote
//! endpoint credentials, which live in the key-value store instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Endpoint used when none has been stored.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1";

/// Display name used when none has been stored.
pub const DEFAULT_CONFIG_NAME: &str = "DeepSeek";

/// Top-level configuration loaded from `~/.studymate/config.toml`.
/// All fields have sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub import: ImportSettings,
}

/// Parameters of the per-turn chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whole-request timeout for remote calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Pacing of import sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Pause between the end of reading and the start of parsing.
    #[serde(default = "default_parse_delay_ms")]
    pub parse_delay_ms: u64,
    /// Pause after reporting 100% before the document is released.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_read_chunk_bytes")]
    pub read_chunk_bytes: usize,
}

fn default_parse_delay_ms() -> u64 {
    300
}

fn default_settle_delay_ms() -> u64 {
    200
}

fn default_read_chunk_bytes() -> usize {
    64 * 1024
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            parse_delay_ms: default_parse_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            read_chunk_bytes: default_read_chunk_bytes(),
        }
    }
}

/// Remote endpoint configuration.
///
/// Both the key and the endpoint must be non-blank for the endpoint to count
/// as configured.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub name: String,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        let has_key = self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
        has_key && !self.endpoint.trim().is_empty()
    }

    /// Key with all but the last four characters hidden, for display.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let visible = chars.len().saturating_sub(4);
            let tail: String = chars[visible..].iter().collect();
            format!("{}{tail}", "*".repeat(visible.min(8)))
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONFIG_NAME.to_string(),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("name", &self.name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
