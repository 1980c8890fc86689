use std::sync::Arc;

use scribe_config::{ProviderType, TranscriptionConfig};

use crate::{
    artifact::ArtifactStore,
    error::{Result, TranscribeError},
    features::{apply_model_options, parse_features},
    http_client::http_client,
    provider::{TranscriptionProvider, deepgram::DeepgramProvider},
    types::{TranscriptionForm, TranscriptionResponse},
};

/// Handler state: one provider client and one artifact store for the process
pub struct Server {
    provider: Arc<dyn TranscriptionProvider>,
    artifacts: ArtifactStore,
    trusted_url_prefix: String,
}

impl Server {
    /// Assemble a server from already constructed parts
    pub fn new(
        provider: Arc<dyn TranscriptionProvider>,
        artifacts: ArtifactStore,
        trusted_url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            artifacts,
            trusted_url_prefix: trusted_url_prefix.into(),
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Validate a submission, forward it to the provider and persist the result
    ///
    /// `features` is parsed before the audio source is chosen, so a broken
    /// options string is reported even when no source was submitted.
    ///
    /// The provider call and the artifact write run on their own task, so a
    /// client hanging up does not abort a transcription already in flight.
    pub(crate) async fn transcribe(&self, form: TranscriptionForm) -> Result<TranscriptionResponse> {
        let mut features = parse_features(form.features.as_deref())?;

        let source = form
            .audio_source(&self.trusted_url_prefix)
            .ok_or(TranscribeError::NoAudioSource)?;

        let model = form
            .model
            .ok_or_else(|| TranscribeError::InvalidRequest("Missing required 'model' field".to_string()))?;

        apply_model_options(&mut features, &model, form.version.as_deref(), form.tier.as_deref());

        tracing::info!(
            provider = self.provider.name(),
            source = source.kind(),
            model = %model,
            "dispatching transcription"
        );

        let provider = Arc::clone(&self.provider);
        let artifacts = self.artifacts.clone();
        let outbound = features.clone();

        let (transcription, saved_file) = tokio::spawn(async move {
            let transcription = provider.transcribe(source, &outbound).await?;
            let saved_file = artifacts.save(&transcription).await?;
            Ok::<_, TranscribeError>((transcription, saved_file))
        })
        .await
        .map_err(|e| TranscribeError::Internal(format!("transcription task failed: {e}")))??;

        Ok(TranscriptionResponse {
            model,
            version: form.version,
            tier: form.tier,
            features,
            transcription,
            saved_file,
        })
    }
}

/// Builder for constructing the server from configuration
pub struct ServerBuilder<'a> {
    config: &'a scribe_config::Config,
}

impl<'a> ServerBuilder<'a> {
    pub fn new(config: &'a scribe_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let provider_config = &self.config.provider;

        let timeout = provider_config
            .timeout()
            .map_err(|e| TranscribeError::Config(e.to_string()))?;
        let client = http_client(timeout)?;

        let provider: Arc<dyn TranscriptionProvider> = match provider_config.provider_type {
            ProviderType::Deepgram => Arc::new(DeepgramProvider::new(
                client,
                provider_config.api_key.clone(),
                provider_config.base_url.as_ref().map(ToString::to_string),
            )),
        };

        let TranscriptionConfig {
            trusted_url_prefix,
            results_dir,
        } = &self.config.transcription;

        let artifacts = ArtifactStore::open(results_dir)?;

        tracing::debug!(
            provider = provider.name(),
            %trusted_url_prefix,
            "transcription server initialized"
        );

        Ok(Server::new(provider, artifacts, trusted_url_prefix.clone()))
    }
}
