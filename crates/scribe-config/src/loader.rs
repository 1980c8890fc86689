use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{Config, ProviderConfig, ServerConfig, TelemetryConfig, TranscriptionConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from defaults and the process environment
    ///
    /// Used when no config file is given; the provider key comes from
    /// `DEEPGRAM_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key variable is unset or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(crate::API_KEY_ENV)
            .map_err(|_| anyhow::anyhow!("{} must be set when no config file is given", crate::API_KEY_ENV))?;

        let config = Self {
            server: ServerConfig::default(),
            transcription: TranscriptionConfig::default(),
            provider: ProviderConfig::with_api_key(SecretString::from(api_key)),
            telemetry: TelemetryConfig::default(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider key is empty, the trusted prefix is
    /// not an http(s) URL, or limits are zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        self.validate_transcription()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        if self.provider.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("provider.api_key must not be empty");
        }

        if self.provider.timeout()?.is_zero() {
            anyhow::bail!("provider.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_transcription(&self) -> anyhow::Result<()> {
        let prefix = &self.transcription.trusted_url_prefix;
        let parsed = url::Url::parse(prefix)
            .map_err(|e| anyhow::anyhow!("transcription.trusted_url_prefix '{prefix}' is not a URL: {e}"))?;

        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            anyhow::bail!("transcription.trusted_url_prefix must be an absolute http(s) URL");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.body_limit_bytes == 0 {
            anyhow::bail!("server.body_limit_bytes must be greater than 0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        tracing::debug!(
            static_dir = %self.server.static_dir.display(),
            results_dir = %self.transcription.results_dir.display(),
            "configuration validated"
        );

        Ok(())
    }
}
