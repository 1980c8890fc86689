#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod artifact;
mod error;
mod features;
mod http_client;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
};

pub use artifact::{ArtifactStore, artifact_name};
pub use error::{NO_AUDIO_SOURCE_MESSAGE, Result, TranscribeError};
pub use provider::TranscriptionProvider;
pub use server::{Server, ServerBuilder};
pub use types::{AudioSource, FeatureMap, TranscriptionForm, TranscriptionResponse, UploadedFile};
use request::ExtractForm;

/// Build the transcription server from configuration
///
/// # Errors
///
/// Returns an error if the provider client or the results directory cannot be set up
pub fn build_server(config: &scribe_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        ServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?,
    );
    Ok(server)
}

/// Create the `/api` router
pub fn endpoint_router(body_limit_bytes: usize) -> Router<Arc<Server>> {
    Router::new()
        .route("/api", post(transcribe).fallback(invalid_method))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractForm(form): ExtractForm,
) -> Result<Json<TranscriptionResponse>> {
    tracing::debug!("transcription handler called for model: {:?}", form.model);

    let response = server.transcribe(form).await?;

    tracing::debug!(saved_file = %response.saved_file, "transcription complete");

    Ok(Json(response))
}

async fn invalid_method() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "Invalid HTTP method")
}
