//! API server configuration.

use helpline_core::completion::DEFAULT_MODEL;
use helpline_core::completion::openai::{API_KEY_ENV, DEFAULT_BASE_URL};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Base URL of the OpenAI-compatible completion API.
    pub provider_base_url: String,
    /// Provider credential. Checked on first use, not at startup.
    pub api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub model: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable        | Default                           |
    /// |-----------------|-----------------------------------|
    /// | `BIND_ADDR`     | `127.0.0.1:3000`                  |
    /// | `GROQ_API_KEY`  | unset                             |
    /// | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1`  |
    /// | `CHAT_MODEL`    | `llama3-8b-8192`                  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            provider_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: std::env::var(API_KEY_ENV).ok(),
            model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}
