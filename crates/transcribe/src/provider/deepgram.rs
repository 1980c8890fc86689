use async_trait::async_trait;
use axum::http::header;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::{
    error::TranscribeError,
    features::query_pairs,
    types::{AudioSource, FeatureMap},
};

use super::TranscriptionProvider;

pub(crate) const DEFAULT_DEEPGRAM_API_URL: &str = "https://api.deepgram.com/v1";

/// Deepgram prerecorded transcription
pub(crate) struct DeepgramProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl DeepgramProvider {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_DEEPGRAM_API_URL.to_string());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn listen_url(&self) -> String {
        format!("{}/listen", self.base_url)
    }
}

#[derive(serde::Serialize)]
struct UrlSource<'a> {
    url: &'a str,
}

#[async_trait]
impl TranscriptionProvider for DeepgramProvider {
    async fn transcribe(&self, source: AudioSource, features: &FeatureMap) -> crate::error::Result<Value> {
        let request = self
            .client
            .post(self.listen_url())
            .query(&query_pairs(features))
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key.expose_secret()));

        let model = features.get("model").and_then(Value::as_str).unwrap_or_default();
        tracing::debug!(source = source.kind(), model, "Deepgram transcription request");

        let request = match source {
            AudioSource::Url(url) => request.json(&UrlSource { url: &url }),
            AudioSource::Buffer { mimetype, data } => {
                tracing::debug!("uploading {} bytes of {mimetype}", data.len());
                request.header(header::CONTENT_TYPE, mimetype).body(data)
            }
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("Deepgram request failed: {e}");
            TranscribeError::Connection(format!("Failed to send request to Deepgram: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Deepgram API error ({status}): {error_text}");

            return Err(TranscribeError::ProviderApi {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Deepgram response: {e}");
            TranscribeError::ProviderApi {
                status: status.as_u16(),
                message: format!("Invalid response from Deepgram: {e}"),
            }
        })?;

        tracing::debug!("Deepgram transcription complete");

        Ok(payload)
    }

    fn name(&self) -> &str {
        "deepgram"
    }
}
