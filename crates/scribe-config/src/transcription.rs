use std::path::PathBuf;

use serde::Deserialize;

/// Only URLs under this prefix are forwarded as remote audio
pub const DEFAULT_TRUSTED_URL_PREFIX: &str = "https://res.cloudinary.com/deepgram";

/// Settings for the `/api` handler and its artifact store
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    #[serde(default = "default_trusted_url_prefix")]
    pub trusted_url_prefix: String,
    /// Directory receiving one `transcript_*.json` per successful request
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            trusted_url_prefix: default_trusted_url_prefix(),
            results_dir: default_results_dir(),
        }
    }
}

fn default_trusted_url_prefix() -> String {
    DEFAULT_TRUSTED_URL_PREFIX.to_string()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
