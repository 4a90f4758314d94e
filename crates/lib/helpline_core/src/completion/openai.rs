//! OpenAI-compatible completion provider.
//!
//! Calls `{base_url}/chat/completions` once per request. Defaults target
//! Groq's OpenAI-compatible endpoint. No retries and no local timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionError, CompletionProvider};
use crate::message::Message;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionResponse {
    fn into_content(self) -> String {
        self.choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

/// Provider speaking the OpenAI `chat/completions` protocol.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// A missing key is accepted here and reported on the first call.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredential(API_KEY_ENV))?;

        debug!(model, count = messages.len(), url = %self.endpoint(), "requesting completion");

        let resp = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&CompletionRequest { model, messages })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Decode(e.to_string()))?;
        Ok(parsed.into_content())
    }
}
