use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};

/// `POST /chat`: translate the submitted text and synthesize its example sentence.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;
    let response = state.translator.translate(&request.text).await?;
    Ok(Json(response))
}

/// `GET /audio/:audio_id`: stream back a previously generated file.
pub async fn serve_audio(
    State(state): State<AppState>,
    Path(audio_id): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.audio_store.read(&audio_id).await?;
    debug!("Serving audio {} ({} bytes)", audio_id, bytes.len());
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response())
}

/// `GET /health`: liveness plus the number of stored audio files.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let audio_files = state.audio_store.count().await.unwrap_or_else(|e| {
        warn!("Could not count audio files: {}", e);
        0
    });
    Json(json!({
        "status": "healthy",
        "audio_files": audio_files
    }))
}
