//! Minimal ElevenLabs text-to-speech client
//!
//! Wraps `POST /v1/text-to-speech/{voice_id}` and returns the MP3 byte
//! payload. Voice-quality settings are fixed; streaming synthesis is out
//! of scope.

use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for ElevenLabs client operations.
pub type Result<T> = std::result::Result<T, ElevenLabsError>;

/// ElevenLabs client errors.
#[derive(Debug, Error)]
pub enum ElevenLabsError {
    /// Configuration error (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error: {0}")]
    Api(String),
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

/// ElevenLabs API client.
#[derive(Clone)]
pub struct ElevenLabsClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsClient {
    /// Create a new ElevenLabs client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: "https://api.elevenlabs.io".to_string(),
        }
    }

    /// Create from environment variable `ELEVENLABS_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ELEVENLABS_API_KEY")
            .map_err(|_| ElevenLabsError::Config("ELEVENLABS_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Synthesize speech for the given text with the given voice.
    ///
    /// Returns the raw MP3 bytes (`audio/mpeg`).
    pub async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Bytes> {
        let request = SynthesizeRequest {
            text,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .http_client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, voice_id))
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "ElevenLabs request failed");
                ElevenLabsError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "ElevenLabs API error");
            return Err(ElevenLabsError::Api(format!(
                "ElevenLabs API error {}: {}",
                status, error_text
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ElevenLabsError::Network(e.to_string()))?;

        debug!(bytes = audio.len(), "Speech synthesis complete");

        Ok(audio)
    }
}
