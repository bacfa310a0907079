//! Routes for the prior-authorization call flow.
//!
//! Required fields are modeled as `Option` and checked by hand so a missing
//! field yields the 400 error envelope (not a framework rejection), and no
//! outbound call is attempted before validation passes.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::p2p;
use crate::server::app::AppState;
use crate::server::error::ApiError;

fn require<'a>(field: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingInput(message.to_string())),
    }
}

// =============================================================================
// POST /api/initiate-first-call
// =============================================================================

#[derive(Deserialize)]
pub struct InitiateFirstCallRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
pub struct InitiateFirstCallResponse {
    pub success: bool,
    pub argument: String,
}

/// Call the doctor and collect their argument for authorization.
pub async fn initiate_first_call_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<InitiateFirstCallRequest>,
) -> Result<Json<InitiateFirstCallResponse>, ApiError> {
    let phone_number = require(&request.phone_number, "Phone number is required")?;

    let argument = p2p::collect_argument(&state.deps, phone_number)
        .await
        .map_err(|e| ApiError::from_stage("Failed to get argument from initial call", e))?;

    Ok(Json(InitiateFirstCallResponse {
        success: true,
        argument,
    }))
}

// =============================================================================
// POST /api/summarize
// =============================================================================

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: String,
}

/// Distill a transcript into a persuasive argument.
pub async fn summarize_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let transcript = require(&request.transcript, "Transcript is required")?;

    let summary = p2p::summarize_argument(&state.deps, transcript)
        .await
        .map_err(|e| ApiError::from_stage("Failed to summarize argument", e))?;

    Ok(Json(SummarizeResponse {
        success: true,
        summary,
    }))
}

// =============================================================================
// POST /api/make-p2p-call
// =============================================================================

#[derive(Deserialize)]
pub struct MakeP2pCallRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize)]
pub struct MakeP2pCallResponse {
    pub success: bool,
    pub transcript: String,
}

/// Place the peer-to-peer call with a caller-supplied prompt.
pub async fn make_p2p_call_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<MakeP2pCallRequest>,
) -> Result<Json<MakeP2pCallResponse>, ApiError> {
    if request.phone_number.is_none() && request.prompt.is_none() {
        return Err(ApiError::MissingInput(
            "Phone number and prompt are required".to_string(),
        ));
    }
    let phone_number = require(&request.phone_number, "Phone number is required")?;
    let prompt = require(&request.prompt, "Prompt is required")?;

    let transcript = p2p::relay_argument(&state.deps, phone_number, prompt)
        .await
        .map_err(|e| ApiError::from_stage("Failed to get transcript from P2P call", e))?;

    Ok(Json(MakeP2pCallResponse {
        success: true,
        transcript,
    }))
}

// =============================================================================
// POST /api/complete-flow
// =============================================================================

#[derive(Deserialize)]
pub struct CompleteFlowRequest {
    #[serde(default)]
    pub doctor_phone: Option<String>,
    #[serde(default)]
    pub p2p_phone: Option<String>,
}

#[derive(Serialize)]
pub struct CompleteFlowResponse {
    pub success: bool,
    pub initial_argument: String,
    pub summary: String,
    pub p2p_transcript: String,
}

/// Run the entire flow: initial call, summarize, then the P2P call.
pub async fn complete_flow_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<CompleteFlowRequest>,
) -> Result<Json<CompleteFlowResponse>, ApiError> {
    if request.doctor_phone.is_none() || request.p2p_phone.is_none() {
        return Err(ApiError::MissingInput(
            "Doctor's phone number and P2P phone number are required".to_string(),
        ));
    }
    let doctor_phone = require(&request.doctor_phone, "Doctor's phone number is required")?;
    let p2p_phone = require(&request.p2p_phone, "P2P phone number is required")?;

    let outcome = p2p::run_complete_flow(&state.deps, doctor_phone, p2p_phone)
        .await
        .map_err(ApiError::from_flow)?;

    Ok(Json(CompleteFlowResponse {
        success: true,
        initial_argument: outcome.initial_argument,
        summary: outcome.summary,
        p2p_transcript: outcome.p2p_transcript,
    }))
}
