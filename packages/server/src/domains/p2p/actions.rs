//! Domain actions for the prior-authorization flow.
//!
//! Each stage is a plain async function over `ServerDeps`. Errors carry the
//! failing stage so callers never see a partial result dressed up as success.

use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::kernel::{CallPoller, CallResult, CallServiceError, PollError, ServerDeps};

use super::prompts;

/// The three sequential stages of the complete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Collect,
    Summarize,
    Relay,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::Collect => write!(f, "collect"),
            FlowStage::Summarize => write!(f, "summarize"),
            FlowStage::Relay => write!(f, "relay"),
        }
    }
}

/// Failure of a single stage.
#[derive(Debug, Error)]
pub enum StageError {
    /// A required input was missing or empty; nothing was sent upstream
    #[error("required input is missing or empty")]
    MissingInput,

    /// The calling service rejected the call job
    #[error("call submission failed: {0}")]
    Submission(String),

    /// The calling service could not be reached
    #[error("call service unreachable: {0}")]
    Transport(String),

    /// The call reached a terminal failed state
    #[error("call failed, no transcript available")]
    CallFailed,

    /// No terminal status within the polling budget
    #[error("timed out waiting for the call to complete")]
    PollTimeout,

    /// Status polling aborted before a terminal result
    #[error(transparent)]
    Poll(#[from] PollError),

    /// The text-generation service failed
    #[error("text generation failed: {0}")]
    Generation(String),
}

/// Submit a call with the given task script and wait for its transcript.
async fn submit_and_wait(
    deps: &ServerDeps,
    phone_number: &str,
    task: &str,
) -> Result<String, StageError> {
    if phone_number.trim().is_empty() || task.trim().is_empty() {
        return Err(StageError::MissingInput);
    }

    let call_id = deps
        .call_service
        .create_call(phone_number, task)
        .await
        .map_err(|e| match e {
            CallServiceError::Transport(msg) => StageError::Transport(msg),
            CallServiceError::Submission(msg) => StageError::Submission(msg),
        })?;

    info!(call_id = %call_id, "Call initiated successfully");

    let poller = CallPoller::new(deps.call_service.clone(), deps.poll_config.clone());
    match poller.wait_for_result(&call_id).await? {
        CallResult::Transcript(text) => Ok(text),
        CallResult::Failure => Err(StageError::CallFailed),
        CallResult::Timeout => Err(StageError::PollTimeout),
    }
}

/// First call: extract the doctor's justification with the fixed script.
pub async fn collect_argument(
    deps: &ServerDeps,
    phone_number: &str,
) -> Result<String, StageError> {
    submit_and_wait(deps, phone_number, prompts::CALL_FOR_ARGUMENT).await
}

/// Distill a transcript into a persuasive argument with the LLM.
pub async fn summarize_argument(
    deps: &ServerDeps,
    transcript: &str,
) -> Result<String, StageError> {
    if transcript.trim().is_empty() {
        return Err(StageError::MissingInput);
    }

    let prompt = prompts::render_p2p_prompt(transcript);
    deps.ai
        .complete(&prompt)
        .await
        .map_err(|e| StageError::Generation(e.to_string()))
}

/// Second call: present caller-supplied text to the authorizing party.
pub async fn relay_argument(
    deps: &ServerDeps,
    phone_number: &str,
    prompt: &str,
) -> Result<String, StageError> {
    submit_and_wait(deps, phone_number, prompt).await
}

/// All three artifacts of a successful complete flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub initial_argument: String,
    pub summary: String,
    pub p2p_transcript: String,
}

/// A complete-flow failure, naming the stage that aborted the pipeline.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct FlowError {
    pub stage: FlowStage,
    #[source]
    pub source: StageError,
}

impl FlowError {
    fn at(stage: FlowStage) -> impl FnOnce(StageError) -> FlowError {
        move |source| FlowError { stage, source }
    }
}

/// Run collect -> summarize -> relay sequentially, aborting at the first
/// failing stage. Both numbers are validated up front so a bad relay target
/// never triggers the first call.
pub async fn run_complete_flow(
    deps: &ServerDeps,
    doctor_phone: &str,
    p2p_phone: &str,
) -> Result<FlowOutcome, FlowError> {
    if doctor_phone.trim().is_empty() {
        return Err(FlowError::at(FlowStage::Collect)(StageError::MissingInput));
    }
    if p2p_phone.trim().is_empty() {
        return Err(FlowError::at(FlowStage::Relay)(StageError::MissingInput));
    }

    let initial_argument = collect_argument(deps, doctor_phone)
        .await
        .map_err(FlowError::at(FlowStage::Collect))?;

    let summary = summarize_argument(deps, &initial_argument)
        .await
        .map_err(FlowError::at(FlowStage::Summarize))?;

    let p2p_transcript = relay_argument(deps, p2p_phone, &summary)
        .await
        .map_err(FlowError::at(FlowStage::Relay))?;

    Ok(FlowOutcome {
        initial_argument,
        summary,
        p2p_transcript,
    })
}
