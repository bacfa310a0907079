//! Chat route with per-session conversation memory.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::chat;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Omitted on the first message; the server mints one and echoes it back.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Handle one chat message, keeping bounded per-session history.
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let message = request.message.unwrap_or_default();

    let response = chat::respond(&state.deps, &state.sessions, &session_id, &message)
        .await
        .map_err(|e| ApiError::Upstream(format!("Chat generation failed: {}", e)))?;

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}
