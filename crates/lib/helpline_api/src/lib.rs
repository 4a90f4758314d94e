//! # helpline_api
//!
//! HTTP API library for Helpline: the chat relay endpoint.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use helpline_core::completion::CompletionProvider;
use helpline_core::completion::openai::OpenAiCompatibleProvider;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

pub const POST_API_CHAT: &str = "/api/chat";
pub const GET_API_HEALTH: &str = "/api/health";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend the relay forwards to.
    pub provider: Arc<dyn CompletionProvider>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Builds state backed by the OpenAI-compatible provider named in `config`.
    pub fn from_config(config: ApiConfig) -> Self {
        let provider =
            OpenAiCompatibleProvider::new(config.provider_base_url.clone(), config.api_key.clone());
        Self {
            provider: Arc::new(provider),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(POST_API_CHAT, post(chat::chat_handler))
        .route(GET_API_HEALTH, get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
