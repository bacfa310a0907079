//! Request and response types for the Bland.ai calls API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/calls`.
///
/// `new()` applies the fixed calling parameters used for every outbound
/// call (voice identity, interruption thresholds, model tier, temperature,
/// language, max duration). Callers only supply the destination number and
/// the task script.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCallRequest {
    pub phone_number: String,
    pub task: String,
    pub voice: String,
    pub wait_for_greeting: bool,
    pub block_interruptions: bool,
    pub interruption_threshold: u32,
    pub model: String,
    pub temperature: f32,
    pub dynamic_data: Vec<serde_json::Value>,
    pub language: String,
    pub max_duration: u32,
}

impl CreateCallRequest {
    pub fn new(phone_number: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            task: task.into(),
            voice: "Josh".to_string(),
            wait_for_greeting: false,
            block_interruptions: false,
            interruption_threshold: 100,
            model: "enhanced".to_string(),
            temperature: 0.3,
            dynamic_data: vec![],
            language: "en-US".to_string(),
            max_duration: 2,
        }
    }
}

/// Response body for `POST /v1/calls`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCallResponse {
    #[serde(default)]
    pub call_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response body for `GET /v1/calls/{call_id}`.
///
/// The status field is an externally-defined string; anything other than
/// "completed" or "failed" means the call is still in flight. The
/// transcript is only populated once the call has completed.
#[derive(Debug, Clone, Deserialize)]
pub struct CallDetails {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub concatenated_transcript: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_call_request_defaults() {
        let request = CreateCallRequest::new("+15550000000", "say hello");

        assert_eq!(request.phone_number, "+15550000000");
        assert_eq!(request.task, "say hello");
        assert_eq!(request.voice, "Josh");
        assert_eq!(request.model, "enhanced");
        assert_eq!(request.language, "en-US");
        assert_eq!(request.max_duration, 2);
        assert!(!request.wait_for_greeting);
    }

    #[test]
    fn test_call_details_tolerates_missing_fields() {
        let details: CallDetails = serde_json::from_str("{}").unwrap();
        assert!(details.status.is_none());
        assert!(details.concatenated_transcript.is_none());
    }
}
