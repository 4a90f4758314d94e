//! Completion module — the external chat-completion service the relay talks to.
//!
//! # Public API
//!
//! - [`CompletionProvider`] — one synchronous (non-streaming) completion call
//! - [`openai::OpenAiCompatibleProvider`] — `chat/completions` over HTTP
//! - [`CompletionError`] — every way a provider call can fail

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::Message;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Errors that can occur during a completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Missing API key: set {0}")]
    MissingCredential(&'static str),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} {body}")]
    Status { status: u16, body: String },

    #[error("Invalid completion response: {0}")]
    Decode(String),
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submits `messages` in order and returns the first choice's text,
    /// or an empty string when the provider returned no usable choice.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, CompletionError>;
}
