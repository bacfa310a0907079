// Route-level tests for the HTTP surface.
//
// Each test builds the router against mock dependencies and drives it with
// tower's oneshot. Call waits run on tokio's paused clock, so even the
// polling paths finish instantly.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::kernel::test_dependencies::{MockAI, MockCallService, TestDependencies};
use server_core::kernel::{CallStatus, PollConfig};
use server_core::server::build_app;

fn fast_poll() -> PollConfig {
    PollConfig {
        interval: Duration::from_secs(5),
        timeout: Duration::from_secs(600),
        max_consecutive_transport_errors: 12,
    }
}

fn app_with(test_deps: TestDependencies) -> Router {
    build_app(Arc::new(test_deps.into_deps()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = app_with(TestDependencies::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_complete_flow_missing_p2p_phone_returns_400_before_any_call() {
    let test_deps = TestDependencies::new();
    let call_service = test_deps.call_service.clone();
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/complete-flow",
            json!({"doctor_phone": "+15551110000"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Doctor's phone number and P2P phone number are required"
    );
    assert!(call_service.create_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_complete_flow_happy_path_returns_all_artifacts() {
    let calls = MockCallService::new()
        .with_status(CallStatus::Completed {
            transcript: Some("Patient needs MRI for chronic pain".to_string()),
        })
        .with_status(CallStatus::Completed {
            transcript: Some("Authorization approved".to_string()),
        });
    let test_deps = TestDependencies::new()
        .mock_calls(calls)
        .mock_ai(MockAI::new().with_response("A persuasive argument"))
        .poll_config(fast_poll());
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/complete-flow",
            json!({"doctor_phone": "+15551110000", "p2p_phone": "+15552220000"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["initial_argument"], "Patient needs MRI for chronic pain");
    assert_eq!(body["summary"], "A persuasive argument");
    assert_eq!(body["p2p_transcript"], "Authorization approved");
}

#[tokio::test(start_paused = true)]
async fn test_initiate_first_call_returns_argument() {
    let calls = MockCallService::new()
        .with_call_id("abc123")
        .with_status(CallStatus::Pending)
        .with_status(CallStatus::Completed {
            transcript: Some("Patient needs MRI for chronic pain".to_string()),
        });
    let test_deps = TestDependencies::new()
        .mock_calls(calls)
        .poll_config(fast_poll());
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/initiate-first-call",
            json!({"phone_number": "+15550000000"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["argument"], "Patient needs MRI for chronic pain");
}

#[tokio::test]
async fn test_initiate_first_call_missing_number_returns_400() {
    let app = app_with(TestDependencies::new());

    let response = app
        .oneshot(post_json("/api/initiate-first-call", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Phone number is required");
}

#[tokio::test(start_paused = true)]
async fn test_initiate_first_call_failed_call_returns_502() {
    let calls = MockCallService::new().with_status(CallStatus::Failed);
    let test_deps = TestDependencies::new()
        .mock_calls(calls)
        .poll_config(fast_poll());
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/initiate-first-call",
            json!({"phone_number": "+15550000000"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to get argument from initial call"));
}

#[tokio::test(start_paused = true)]
async fn test_initiate_first_call_timeout_returns_504() {
    let test_deps = TestDependencies::new().poll_config(PollConfig {
        interval: Duration::from_secs(1),
        timeout: Duration::from_secs(3),
        max_consecutive_transport_errors: 12,
    });
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/initiate-first-call",
            json!({"phone_number": "+15550000000"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Timed out waiting for the call to complete");
}

#[tokio::test]
async fn test_summarize_returns_summary_envelope() {
    let test_deps =
        TestDependencies::new().mock_ai(MockAI::new().with_response("Distilled argument"));
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json("/api/summarize", json!({"transcript": "raw call"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["summary"], "Distilled argument");
}

#[tokio::test]
async fn test_summarize_missing_transcript_returns_400() {
    let test_deps = TestDependencies::new();
    let ai = test_deps.ai.clone();
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json("/api/summarize", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Transcript is required");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_make_p2p_call_requires_both_fields() {
    let app = app_with(TestDependencies::new());

    let response = app
        .oneshot(post_json("/api/make-p2p-call", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Phone number and prompt are required");
}

#[tokio::test(start_paused = true)]
async fn test_make_p2p_call_submits_caller_prompt() {
    let calls = MockCallService::new().with_status(CallStatus::Completed {
        transcript: Some("second transcript".to_string()),
    });
    let test_deps = TestDependencies::new()
        .mock_calls(calls)
        .poll_config(fast_poll());
    let call_service = test_deps.call_service.clone();
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json(
            "/api/make-p2p-call",
            json!({"phone_number": "+15552220000", "prompt": "present this argument"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["transcript"], "second transcript");
    assert!(call_service.was_called_with_task("present this argument"));
}

#[tokio::test]
async fn test_chat_mints_session_id_and_keeps_memory() {
    let test_deps = TestDependencies::new().mock_ai(
        MockAI::new()
            .with_response("Hello! Tell me about yourself.")
            .with_response("Nice to meet you, Sam."),
    );
    let ai = test_deps.ai.clone();
    let app = app_with(test_deps);

    let response = app
        .clone()
        .oneshot(post_json("/api/chat", json!({"message": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], "Hello! Tell me about yourself.");
    let session_id = body["session_id"].as_str().unwrap().to_string();
    assert!(!session_id.is_empty());

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({"message": "I'm Sam", "session_id": session_id.clone()}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["session_id"], session_id.as_str());
    // The second prompt carries the first exchange.
    let prompt = ai.last_prompt().unwrap();
    assert!(prompt.contains("User: hi"));
    assert!(prompt.contains("AI: Hello! Tell me about yourself."));
}

#[tokio::test]
async fn test_chat_empty_message_gets_fallback_reply() {
    let test_deps = TestDependencies::new();
    let ai = test_deps.ai.clone();
    let app = app_with(test_deps);

    let response = app
        .oneshot(post_json("/api/chat", json!({"message": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], "I didn't catch that. Could you repeat?");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_tts_returns_audio_bytes() {
    let app = app_with(TestDependencies::new());

    let response = app
        .oneshot(post_json("/api/tts", json!({"text": "read this aloud"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "audio/mpeg"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"mock-mp3-bytes");
}

#[tokio::test]
async fn test_tts_missing_text_returns_400() {
    let app = app_with(TestDependencies::new());

    let response = app
        .oneshot(post_json("/api/tts", json!({"text": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No text provided");
}
