use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bland_api_key: String,
    pub elevenlabs_api_key: String,
    pub elevenlabs_voice_id: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let config = Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            bland_api_key: env::var("BLAND_API_KEY")
                .context("BLAND_API_KEY must be set")?,
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY")
                .context("ELEVENLABS_API_KEY must be set")?,
            elevenlabs_voice_id: env::var("ELEVENLABS_VOICE_ID")
                .context("ELEVENLABS_VOICE_ID must be set")?,
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3".to_string()),
            poll_interval_secs: env::var("CALL_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("CALL_POLL_INTERVAL_SECS must be a valid number")?,
            poll_timeout_secs: env::var("CALL_POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("CALL_POLL_TIMEOUT_SECS must be a valid number")?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Check that polling parameters make sense before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("CALL_POLL_INTERVAL_SECS must be positive");
        }
        if self.poll_timeout_secs == 0 {
            anyhow::bail!("CALL_POLL_TIMEOUT_SECS must be positive");
        }
        if self.poll_interval_secs > self.poll_timeout_secs {
            anyhow::bail!(
                "CALL_POLL_INTERVAL_SECS ({}) must not exceed CALL_POLL_TIMEOUT_SECS ({})",
                self.poll_interval_secs,
                self.poll_timeout_secs
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 8080,
            bland_api_key: "org_test".to_string(),
            elevenlabs_api_key: "sk_test".to_string(),
            elevenlabs_voice_id: "voice".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3".to_string(),
            poll_interval_secs: 5,
            poll_timeout_secs: 600,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = test_config();
        config.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_longer_than_timeout_rejected() {
        let mut config = test_config();
        config.poll_interval_secs = 120;
        config.poll_timeout_secs = 60;
        assert!(config.validate().is_err());
    }
}
