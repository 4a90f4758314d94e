//! Chat relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use helpline_core::relay::{self, ChatReply, RelayError};
use serde_json::Value;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `POST /api/chat` — forward the message history to the completion provider.
///
/// Bodies that are not JSON or lack a `messages` array are rejected before
/// the provider is contacted.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ChatReply>> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "chat body is not JSON");
        AppError::from(RelayError::MissingMessages)
    })?;
    let messages = relay::parse_messages(&body)?;

    let reply = relay::relay(state.provider.as_ref(), &state.config.model, &messages).await?;
    Ok(Json(reply))
}
