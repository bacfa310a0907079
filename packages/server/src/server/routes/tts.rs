//! Text-to-speech passthrough route.

use axum::extract::Extension;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Synthesize speech for the given text and stream back MP3 audio.
pub async fn tts_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    let text = match request.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::MissingInput("No text provided".to_string())),
    };

    let audio = state
        .deps
        .speech
        .synthesize(text)
        .await
        .map_err(|e| ApiError::Upstream(format!("TTS API error: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
