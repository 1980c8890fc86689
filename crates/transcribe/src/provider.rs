pub(crate) mod deepgram;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{AudioSource, FeatureMap};

/// Trait for transcription provider implementations
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe prerecorded audio, returning the provider's raw payload
    async fn transcribe(&self, source: AudioSource, features: &FeatureMap) -> crate::error::Result<Value>;

    /// Get the provider name
    fn name(&self) -> &str;
}
