//! API error envelope.
//!
//! Every failed request returns `{"error": "<message>"}` with a status code
//! matching the failure class: 400 when a required field is missing (no
//! upstream call was attempted), 504 when a call wait timed out, and 502
//! when an upstream stage failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domains::p2p::{FlowError, FlowStage, StageError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is absent or empty
    #[error("{0}")]
    MissingInput(String),

    /// An upstream stage (call service, LLM, TTS) failed
    #[error("{0}")]
    Upstream(String),

    /// A call wait exhausted its timeout budget
    #[error("Timed out waiting for the call to complete")]
    PollTimeout,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Wrap a stage error with the operation's user-facing context message.
    pub fn from_stage(context: &str, error: StageError) -> Self {
        match error {
            StageError::MissingInput => ApiError::MissingInput(context.to_string()),
            StageError::PollTimeout => ApiError::PollTimeout,
            other => ApiError::Upstream(format!("{}: {}", context, other)),
        }
    }

    /// Wrap a flow error with the message for its failing stage.
    pub fn from_flow(error: FlowError) -> Self {
        let context = match error.stage {
            FlowStage::Collect => "Failed to get argument from initial call",
            FlowStage::Summarize => "Failed to summarize argument",
            FlowStage::Relay => "Failed to get transcript from P2P call",
        };
        Self::from_stage(context, error.source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::PollTimeout => StatusCode::GATEWAY_TIMEOUT,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
