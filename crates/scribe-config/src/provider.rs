use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for the upstream transcription provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: ProviderType,
    /// API key
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Request timeout for the upstream call (e.g. "300s", "5m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl ProviderConfig {
    /// Provider config with defaults for everything but the key
    pub fn with_api_key(api_key: SecretString) -> Self {
        Self {
            provider_type: ProviderType::default(),
            api_key,
            base_url: None,
            timeout: default_timeout(),
        }
    }

    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration string
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid provider timeout '{}': {e}", self.timeout))
    }
}

/// Supported transcription providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// Deepgram prerecorded `listen` API
    #[default]
    Deepgram,
}

fn default_timeout() -> String {
    "300s".to_string()
}
