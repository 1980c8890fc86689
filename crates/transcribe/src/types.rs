use axum::body::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

/// Provider options sent alongside the audio
pub type FeatureMap = Map<String, Value>;

/// Uploaded audio held in memory until the provider call completes
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// MIME type reported by the client
    pub content_type: String,
    /// Raw audio bytes
    pub data: Bytes,
}

/// Fields of one `/api` submission, before validation
#[derive(Debug, Default)]
pub struct TranscriptionForm {
    pub url: Option<String>,
    pub file: Option<UploadedFile>,
    /// JSON object literal, parsed later
    pub features: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub tier: Option<String>,
}

impl TranscriptionForm {
    /// Pick the audio to forward
    ///
    /// An uploaded file always wins over a URL. A URL is only usable when it
    /// starts with `trusted_prefix`; anything else is ignored rather than
    /// rejected.
    pub fn audio_source(&self, trusted_prefix: &str) -> Option<AudioSource> {
        let from_url = self
            .url
            .as_deref()
            .filter(|url| url.starts_with(trusted_prefix))
            .map(|url| AudioSource::Url(url.to_owned()));

        match &self.file {
            Some(file) => {
                if from_url.is_some() {
                    tracing::debug!("both url and file submitted, using the uploaded file");
                }
                Some(AudioSource::Buffer {
                    mimetype: file.content_type.clone(),
                    data: file.data.clone(),
                })
            }
            None => from_url,
        }
    }
}

/// Where the provider reads the audio from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Remote file fetched by the provider
    Url(String),
    /// Bytes uploaded by the caller
    Buffer { mimetype: String, data: Bytes },
}

impl AudioSource {
    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Buffer { .. } => "buffer",
        }
    }
}

/// Successful `/api` response body
#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub model: String,
    /// Version as submitted by the caller
    pub version: Option<String>,
    /// Tier as submitted by the caller, before defaulting
    pub tier: Option<String>,
    /// Options actually sent to the provider
    #[serde(rename = "dgFeatures")]
    pub features: FeatureMap,
    /// Raw provider payload
    pub transcription: Value,
    /// Artifact filename under the results directory
    pub saved_file: String,
}
