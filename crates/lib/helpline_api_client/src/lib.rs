//! # helpline_api_client
//!
//! Typed HTTP client for the Helpline relay, plus drivers that run the
//! sans-IO state machines from `helpline_core` against it.

pub mod driver;

use helpline_core::failure::RelayFailure;
use helpline_core::relay::{ChatReply, ChatRequest};
use reqwest::{Client, Response};
use thiserror::Error;
use url::Url;

/// Errors returned by [`RelayClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch: {0}")]
    Unreachable(reqwest::Error),

    #[error("Network response was not ok: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Invalid response body: {0}")]
    Decode(reqwest::Error),
}

impl ClientError {
    /// Tags the error for the chat session's message table.
    pub fn to_failure(&self) -> RelayFailure {
        match self {
            ClientError::Status {
                status,
                status_text,
            } => RelayFailure::BadStatus {
                status: *status,
                status_text: status_text.clone(),
            },
            ClientError::Unreachable(e) => RelayFailure::Unreachable(e.to_string()),
            ClientError::InvalidUrl(_) | ClientError::Decode(_) => {
                RelayFailure::Unexpected(self.to_string())
            }
        }
    }
}

/// Client for the relay's HTTP surface.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    chat_url: Url,
    start_bot_url: Url,
}

impl RelayClient {
    /// `server` is the relay origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(server: &str) -> Result<Self, ClientError> {
        let base = Url::parse(server)?;
        Ok(Self {
            client: Client::new(),
            chat_url: base.join("/api/chat")?,
            start_bot_url: base.join("/api/start-bot")?,
        })
    }

    /// `POST /api/chat`.
    pub async fn post_chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let resp = self
            .client
            .post(self.chat_url.clone())
            .json(request)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;
        let resp = ensure_success(resp)?;
        resp.json::<ChatReply>().await.map_err(ClientError::Decode)
    }

    /// `POST /api/start-bot`. Any 2xx status counts as started.
    pub async fn start_bot(&self) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(self.start_bot_url.clone())
            .send()
            .await
            .map_err(ClientError::Unreachable)?;
        ensure_success(resp).map(|_| ())
    }
}

fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    })
}
