// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "collect the doctor's argument") should be domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseCallService)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Call Service Trait (Infrastructure - outbound voice calls)
// =============================================================================

/// Errors from the external voice-calling service.
///
/// The poller's retry policy depends on this split: transport errors during
/// a status check are tolerated and retried, everything else is not.
#[derive(Debug, Error)]
pub enum CallServiceError {
    /// The service rejected the request (non-2xx status, malformed reply)
    #[error("call service rejected the request: {0}")]
    Submission(String),

    /// The request could not be sent or received (network failure)
    #[error("call service transport error: {0}")]
    Transport(String),
}

/// Status of an externally-tracked call job, as observed by a single poll.
///
/// The lifecycle lives entirely in the external service; this system only
/// observes. Any status string other than "completed" or "failed" (including
/// a missing one) is reported as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    /// Terminal: the call finished; transcript may be absent
    Completed { transcript: Option<String> },
    /// Terminal: the call did not complete
    Failed,
    /// Still in flight (or an unrecognized status)
    Pending,
}

#[async_trait]
pub trait BaseCallService: Send + Sync {
    /// Submit one outbound call. Returns the opaque job identifier assigned
    /// by the service. Non-retrying; the caller owns the retry policy.
    async fn create_call(
        &self,
        phone_number: &str,
        task: &str,
    ) -> std::result::Result<String, CallServiceError>;

    /// Query the current status of a call job.
    async fn call_status(
        &self,
        call_id: &str,
    ) -> std::result::Result<CallStatus, CallServiceError>;
}

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Speech Trait (Infrastructure - text-to-speech)
// =============================================================================

#[async_trait]
pub trait BaseSpeechService: Send + Sync {
    /// Synthesize speech for the given text. Returns MP3 bytes.
    async fn synthesize(&self, text: &str) -> Result<bytes::Bytes>;
}
