// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::poller::PollConfig;
use super::traits::{BaseAI, BaseCallService, BaseSpeechService, CallServiceError, CallStatus};
use super::ServerDeps;

// =============================================================================
// Mock Call Service
// =============================================================================

/// Arguments captured from a create_call invocation
#[derive(Debug, Clone)]
pub struct CreateCallArgs {
    pub phone_number: String,
    pub task: String,
}

pub struct MockCallService {
    call_id: String,
    submission_error: Mutex<Option<CallServiceError>>,
    statuses: Mutex<Vec<std::result::Result<CallStatus, CallServiceError>>>,
    create_calls: Mutex<Vec<CreateCallArgs>>,
    status_polls: Mutex<u32>,
}

impl MockCallService {
    pub fn new() -> Self {
        Self {
            call_id: "abc123".to_string(),
            submission_error: Mutex::new(None),
            statuses: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            status_polls: Mutex::new(0),
        }
    }

    /// Use a specific call id for submitted calls
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = call_id.into();
        self
    }

    /// Queue a status to be observed by the next poll
    pub fn with_status(self, status: CallStatus) -> Self {
        self.statuses.lock().unwrap().push(Ok(status));
        self
    }

    /// Queue an error to be returned by the next status poll
    pub fn with_status_error(self, error: CallServiceError) -> Self {
        self.statuses.lock().unwrap().push(Err(error));
        self
    }

    /// Make call submission fail
    pub fn with_submission_error(self, error: CallServiceError) -> Self {
        *self.submission_error.lock().unwrap() = Some(error);
        self
    }

    /// Get all submitted calls with their arguments
    pub fn create_calls(&self) -> Vec<CreateCallArgs> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Check if a call was submitted with a task containing the given text
    pub fn was_called_with_task(&self, text: &str) -> bool {
        self.create_calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.task.contains(text))
    }

    /// Number of status polls performed
    pub fn status_poll_count(&self) -> u32 {
        *self.status_polls.lock().unwrap()
    }
}

impl Default for MockCallService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCallService for MockCallService {
    async fn create_call(
        &self,
        phone_number: &str,
        task: &str,
    ) -> std::result::Result<String, CallServiceError> {
        if let Some(error) = self.submission_error.lock().unwrap().take() {
            return Err(error);
        }

        self.create_calls.lock().unwrap().push(CreateCallArgs {
            phone_number: phone_number.to_string(),
            task: task.to_string(),
        });

        Ok(self.call_id.clone())
    }

    async fn call_status(
        &self,
        _call_id: &str,
    ) -> std::result::Result<CallStatus, CallServiceError> {
        *self.status_polls.lock().unwrap() += 1;

        let mut statuses = self.statuses.lock().unwrap();
        if !statuses.is_empty() {
            statuses.remove(0)
        } else {
            // Default to still-pending once the scripted sequence is drained
            Ok(CallStatus::Pending)
        }
    }
}

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Make every completion fail
    pub fn failing() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Get all prompts that were sent to the AI
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if self.fail {
            anyhow::bail!("mock AI failure");
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("Mock AI response".to_string())
        }
    }
}

// =============================================================================
// Mock Speech Service
// =============================================================================

pub struct MockSpeechService {
    audio: bytes::Bytes,
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockSpeechService {
    pub fn new() -> Self {
        Self {
            audio: bytes::Bytes::from_static(b"mock-mp3-bytes"),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Make every synthesis fail
    pub fn failing() -> Self {
        Self {
            audio: bytes::Bytes::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Get all texts that were synthesized
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSpeechService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSpeechService for MockSpeechService {
    async fn synthesize(&self, text: &str) -> Result<bytes::Bytes> {
        self.calls.lock().unwrap().push(text.to_string());

        if self.fail {
            anyhow::bail!("mock TTS failure");
        }

        Ok(self.audio.clone())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub call_service: Arc<MockCallService>,
    pub ai: Arc<MockAI>,
    pub speech: Arc<MockSpeechService>,
    pub poll_config: PollConfig,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            call_service: Arc::new(MockCallService::new()),
            ai: Arc::new(MockAI::new()),
            speech: Arc::new(MockSpeechService::new()),
            poll_config: PollConfig::default(),
        }
    }

    /// Set a mock call service
    pub fn mock_calls(mut self, service: MockCallService) -> Self {
        self.call_service = Arc::new(service);
        self
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// Set a mock speech service
    pub fn mock_speech(mut self, speech: MockSpeechService) -> Self {
        self.speech = Arc::new(speech);
        self
    }

    /// Override the polling parameters
    pub fn poll_config(mut self, config: PollConfig) -> Self {
        self.poll_config = config;
        self
    }

    /// Convert into ServerDeps for injection
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.call_service,
            self.ai,
            self.speech,
            self.poll_config,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
