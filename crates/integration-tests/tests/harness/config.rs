//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use scribe_config::{
    Config, DEFAULT_BODY_LIMIT_BYTES, HealthConfig, ProviderConfig, ServerConfig, TelemetryConfig,
    TranscriptionConfig,
};
use secrecy::SecretString;

/// API key the mock provider expects
pub const TEST_API_KEY: &str = "test-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal config pointing at a provider and writing into `workdir`
    pub fn new(provider_base_url: &str, workdir: &Path) -> Self {
        let mut provider = ProviderConfig::with_api_key(SecretString::from(TEST_API_KEY));
        provider.base_url = Some(provider_base_url.parse().expect("valid URL"));
        provider.timeout = "5s".to_string();

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    static_dir: workdir.join("static"),
                    body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
                    health: HealthConfig::default(),
                },
                transcription: TranscriptionConfig {
                    results_dir: workdir.join("results"),
                    ..TranscriptionConfig::default()
                },
                provider,
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Limit request bodies
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.config.server.body_limit_bytes = bytes;
        self
    }

    /// Replace the trusted URL prefix
    pub fn with_trusted_prefix(mut self, prefix: &str) -> Self {
        self.config.transcription.trusted_url_prefix = prefix.to_owned();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
