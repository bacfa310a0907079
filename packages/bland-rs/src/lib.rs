//! Pure Bland.ai REST API client
//!
//! A clean, minimal client for the Bland.ai voice-calling API with no
//! domain-specific logic. Supports call creation and call-status retrieval.
//!
//! # Example
//!
//! ```rust,ignore
//! use bland::BlandClient;
//!
//! let client = BlandClient::from_env()?;
//!
//! let call_id = client.create_call("+15550000000", "Ask for the account number.").await?;
//! let details = client.get_call(&call_id).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{BlandError, Result};
pub use types::{CallDetails, CreateCallRequest, CreateCallResponse};

use reqwest::Client;
use tracing::{debug, warn};

/// Pure Bland.ai API client.
#[derive(Clone)]
pub struct BlandClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl BlandClient {
    /// Create a new Bland client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.bland.ai".to_string(),
        }
    }

    /// Create from environment variable `BLAND_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BLAND_API_KEY")
            .map_err(|_| BlandError::Config("BLAND_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an outbound call.
    ///
    /// Issues one call-creation request and returns the opaque call id
    /// assigned by the service. No retries; callers own the retry policy.
    pub async fn create_call(&self, phone_number: &str, task: &str) -> Result<String> {
        let request = CreateCallRequest::new(phone_number, task);

        let response = self
            .http_client
            .post(format!("{}/v1/calls", self.base_url))
            .header("authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Bland call-creation request failed");
                BlandError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Bland API error");
            return Err(BlandError::Api(format!(
                "Bland API error {}: {}",
                status, error_text
            )));
        }

        let call_response: CreateCallResponse = response
            .json()
            .await
            .map_err(|e| BlandError::Parse(e.to_string()))?;

        let call_id = call_response
            .call_id
            .ok_or_else(|| BlandError::Api("No call_id returned from Bland".into()))?;

        debug!(call_id = %call_id, "Call initiated");

        Ok(call_id)
    }

    /// Fetch the current details of a call.
    ///
    /// Returns the externally-defined status string plus the transcript
    /// field, which is only present once the call has completed.
    pub async fn get_call(&self, call_id: &str) -> Result<CallDetails> {
        let response = self
            .http_client
            .get(format!("{}/v1/calls/{}", self.base_url, call_id))
            .header("authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(call_id = %call_id, error = %e, "Bland call-status request failed");
                BlandError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Bland call-status error");
            return Err(BlandError::Api(format!(
                "Bland call-status error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BlandError::Parse(e.to_string()))
    }
}
