//! Relay — validates a chat request and forwards it to the completion provider.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
#[cfg(feature = "provider")]
use tracing::{error, info};

#[cfg(feature = "provider")]
use crate::completion::{CompletionError, CompletionProvider};
use crate::message::Message;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// Successful body of `POST /api/chat`.
///
/// A missing or null `content` reads as an empty reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors produced while relaying a chat request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request: messages array is required")]
    MissingMessages,

    #[error("Invalid request: message {index} is malformed: {reason}")]
    MalformedMessage { index: usize, reason: String },

    #[cfg(feature = "provider")]
    #[error(transparent)]
    Upstream(#[from] CompletionError),
}

/// Extracts the `messages` array from a raw request body.
///
/// Only the shape is checked; an empty array is accepted and forwarded.
pub fn parse_messages(body: &Value) -> Result<Vec<Message>, RelayError> {
    let items = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or(RelayError::MissingMessages)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Message::deserialize(item).map_err(|e| RelayError::MalformedMessage {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Forwards `messages` verbatim to `provider` and wraps the reply.
#[cfg(feature = "provider")]
pub async fn relay(
    provider: &dyn CompletionProvider,
    model: &str,
    messages: &[Message],
) -> Result<ChatReply, RelayError> {
    match provider.complete(model, messages).await {
        Ok(content) => {
            info!(model, messages = messages.len(), reply_len = content.len(), "relayed chat");
            Ok(ChatReply { content })
        }
        Err(e) => {
            error!(error = %e, model, "completion provider call failed");
            Err(RelayError::Upstream(e))
        }
    }
}
