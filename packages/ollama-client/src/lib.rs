//! Minimal Ollama REST API client
//!
//! A small client for a locally-hosted Ollama server. Only the
//! non-streaming generate endpoint is supported; structured output and
//! chat-style APIs are out of scope.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_client::OllamaClient;
//!
//! let client = OllamaClient::new("http://localhost:11434");
//! let text = client.generate("llama3", "Summarize this transcript: ...").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OllamaError, Result};
pub use types::{GenerateRequest, GenerateResponse};

use reqwest::Client;
use tracing::{debug, warn};

/// Client for a local Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client pointed at the given base URL
    /// (typically `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a completion for a prompt (non-streaming).
    ///
    /// Returns the generated text verbatim. An empty or missing response
    /// field is an API error, not an empty string.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let request = GenerateRequest::new(model, prompt);

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Ollama request failed");
                OllamaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Ollama API error");
            return Err(OllamaError::Api(format!(
                "Ollama API error {}: {}",
                status, error_text
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        let text = generate_response
            .response
            .filter(|r| !r.is_empty())
            .ok_or_else(|| OllamaError::Api("No response from Ollama".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Ollama generation complete"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OllamaClient::new("http://localhost:11434");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
