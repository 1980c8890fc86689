use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Message returned when neither a trusted URL nor a file was submitted
pub const NO_AUDIO_SOURCE_MESSAGE: &str = "Error: You need to choose a file to transcribe your own audio.";

/// Failures of the `/api` handler, each rendered as `{"err": "..."}`
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// No trusted URL and no uploaded file
    #[error("{}", NO_AUDIO_SOURCE_MESSAGE)]
    NoAudioSource,

    /// The `features` field is missing or not a JSON object
    #[error("{0}")]
    InvalidFeatures(String),

    /// Malformed form submission
    #[error("{0}")]
    InvalidRequest(String),

    /// The provider could not be reached
    #[error("{0}")]
    Connection(String),

    /// The provider answered with an error or an unreadable body
    #[error("{message}")]
    ProviderApi { status: u16, message: String },

    /// Writing the artifact failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Startup misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dispatch task did not complete
    #[error("{0}")]
    Internal(String),
}

impl TranscribeError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoAudioSource | Self::InvalidFeatures(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Connection(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderApi { status, .. } => match *status {
                400 => StatusCode::BAD_REQUEST,
                401 => StatusCode::UNAUTHORIZED,
                403 => StatusCode::FORBIDDEN,
                429 => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Io(_) | Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NoAudioSource | Self::InvalidFeatures(_) | Self::InvalidRequest(_)
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    err: String,
}

impl IntoResponse for TranscribeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!(%status, "rejected transcription request: {self}");
        } else {
            tracing::error!(%status, "transcription failed: {self}");
        }

        (status, Json(ErrorResponse { err: self.to_string() })).into_response()
    }
}
