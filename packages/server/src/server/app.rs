//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use bland::BlandClient;
use elevenlabs::ElevenLabsClient;
use ollama_client::OllamaClient;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::{
    BlandAdapter, ElevenLabsAdapter, OllamaAdapter, PollConfig, ServerDeps, SessionStore,
};
use crate::server::routes::{
    chat_handler, complete_flow_handler, health_handler, initiate_first_call_handler,
    make_p2p_call_handler, summarize_handler, tts_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    pub sessions: SessionStore,
}

/// Wire the real external-service clients into the dependency container.
pub fn build_deps(config: &Config) -> Arc<ServerDeps> {
    let bland = Arc::new(BlandClient::new(config.bland_api_key.clone()));
    let ollama = OllamaClient::new(config.ollama_base_url.clone());
    let eleven = ElevenLabsClient::new(config.elevenlabs_api_key.clone());

    let poll_config = PollConfig {
        interval: Duration::from_secs(config.poll_interval_secs),
        timeout: Duration::from_secs(config.poll_timeout_secs),
        ..PollConfig::default()
    };

    Arc::new(ServerDeps::new(
        Arc::new(BlandAdapter::new(bland)),
        Arc::new(OllamaAdapter::new(ollama, config.ollama_model.clone())),
        Arc::new(ElevenLabsAdapter::new(
            eleven,
            config.elevenlabs_voice_id.clone(),
        )),
        poll_config,
    ))
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let app_state = AppState {
        deps,
        sessions: SessionStore::new(),
    };

    // CORS configuration - the web frontend runs on a different origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/initiate-first-call", post(initiate_first_call_handler))
        .route("/api/summarize", post(summarize_handler))
        .route("/api/make-p2p-call", post(make_p2p_call_handler))
        .route("/api/complete-flow", post(complete_flow_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/tts", post(tts_handler))
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
