//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions, plus the adapters that bridge the external-service client crates
//! to the kernel traits.

use anyhow::Result;
use async_trait::async_trait;
use bland::{BlandClient, BlandError};
use elevenlabs::ElevenLabsClient;
use ollama_client::OllamaClient;
use std::sync::Arc;

use super::poller::PollConfig;
use super::traits::{BaseAI, BaseCallService, BaseSpeechService, CallServiceError, CallStatus};

// =============================================================================
// BlandClient Adapter (implements BaseCallService trait)
// =============================================================================

/// Wrapper around BlandClient that implements the BaseCallService trait
pub struct BlandAdapter(pub Arc<BlandClient>);

impl BlandAdapter {
    pub fn new(client: Arc<BlandClient>) -> Self {
        Self(client)
    }
}

fn map_bland_error(error: BlandError) -> CallServiceError {
    match error {
        BlandError::Network(e) => CallServiceError::Transport(e),
        other => CallServiceError::Submission(other.to_string()),
    }
}

#[async_trait]
impl BaseCallService for BlandAdapter {
    async fn create_call(
        &self,
        phone_number: &str,
        task: &str,
    ) -> std::result::Result<String, CallServiceError> {
        self.0
            .create_call(phone_number, task)
            .await
            .map_err(map_bland_error)
    }

    async fn call_status(
        &self,
        call_id: &str,
    ) -> std::result::Result<CallStatus, CallServiceError> {
        let details = self.0.get_call(call_id).await.map_err(map_bland_error)?;
        Ok(map_call_status(details))
    }
}

fn map_call_status(details: bland::CallDetails) -> CallStatus {
    match details.status.as_deref() {
        Some("completed") => CallStatus::Completed {
            transcript: details.concatenated_transcript,
        },
        Some("failed") => CallStatus::Failed,
        // Any other (or missing) status string means still in flight.
        _ => CallStatus::Pending,
    }
}

// =============================================================================
// OllamaClient Adapter (implements BaseAI trait)
// =============================================================================

/// Wrapper around OllamaClient that implements the BaseAI trait with a
/// fixed model name chosen at startup.
pub struct OllamaAdapter {
    client: OllamaClient,
    model: String,
}

impl OllamaAdapter {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for OllamaAdapter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.client
            .generate(&self.model, prompt)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ElevenLabsClient Adapter (implements BaseSpeechService trait)
// =============================================================================

/// Wrapper around ElevenLabsClient that implements the BaseSpeechService
/// trait with a fixed voice chosen at startup.
pub struct ElevenLabsAdapter {
    client: ElevenLabsClient,
    voice_id: String,
}

impl ElevenLabsAdapter {
    pub fn new(client: ElevenLabsClient, voice_id: impl Into<String>) -> Self {
        Self {
            client,
            voice_id: voice_id.into(),
        }
    }
}

#[async_trait]
impl BaseSpeechService for ElevenLabsAdapter {
    async fn synthesize(&self, text: &str) -> Result<bytes::Bytes> {
        self.client
            .synthesize(&self.voice_id, text)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain actions (traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub call_service: Arc<dyn BaseCallService>,
    pub ai: Arc<dyn BaseAI>,
    pub speech: Arc<dyn BaseSpeechService>,
    /// Polling parameters shared by every call wait
    pub poll_config: PollConfig,
}

impl ServerDeps {
    pub fn new(
        call_service: Arc<dyn BaseCallService>,
        ai: Arc<dyn BaseAI>,
        speech: Arc<dyn BaseSpeechService>,
        poll_config: PollConfig,
    ) -> Self {
        Self {
            call_service,
            ai,
            speech,
            poll_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_maps_to_pending() {
        let details = bland::CallDetails {
            status: Some("queued".to_string()),
            concatenated_transcript: None,
        };
        assert_eq!(map_call_status(details), CallStatus::Pending);

        let missing = bland::CallDetails {
            status: None,
            concatenated_transcript: None,
        };
        assert_eq!(map_call_status(missing), CallStatus::Pending);
    }

    #[test]
    fn test_completed_status_carries_transcript() {
        let details = bland::CallDetails {
            status: Some("completed".to_string()),
            concatenated_transcript: Some("the transcript".to_string()),
        };
        assert_eq!(
            map_call_status(details),
            CallStatus::Completed {
                transcript: Some("the transcript".to_string())
            }
        );
    }

    #[test]
    fn test_bland_error_mapping() {
        let transport = map_bland_error(BlandError::Network("refused".into()));
        assert!(matches!(transport, CallServiceError::Transport(_)));

        let submission = map_bland_error(BlandError::Api("400 bad request".into()));
        assert!(matches!(submission, CallServiceError::Submission(_)));
    }
}
