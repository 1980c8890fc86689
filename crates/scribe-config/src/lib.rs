#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod provider;
pub mod server;
pub mod telemetry;
pub mod transcription;

use serde::Deserialize;

pub use health::*;
pub use provider::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};
pub use transcription::*;

/// Environment variable holding the Deepgram credential
pub const API_KEY_ENV: &str = "DEEPGRAM_API_KEY";

/// Top-level Scribe configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Request handling and artifact storage
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Upstream transcription provider
    pub provider: ProviderConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
