use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// Model output matched none of the accepted shapes.
    #[error("Response parsing failed for: {snippet}...")]
    Parse { snippet: String },

    #[error("Translation matches input")]
    EchoedInput,

    #[error("Invalid audio ID")]
    InvalidAudioId,

    #[error("Audio not found")]
    AudioNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput | AppError::InvalidAudioId => StatusCode::BAD_REQUEST,
            AppError::AudioNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
