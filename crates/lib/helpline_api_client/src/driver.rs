//! Drivers — run the chat session and the bot launcher against the relay.

use std::collections::VecDeque;

use helpline_core::dashboard::BotLauncher;
use helpline_core::session::{ChatSession, Effect, Event};
use tracing::{debug, warn};

use crate::{ClientError, RelayClient};

/// Receives transcript updates from a [`ChatDriver`].
pub trait TranscriptView {
    /// The transcript changed; show the newest message.
    fn scroll_to_latest(&mut self, session: &ChatSession);
}

/// Owns a [`ChatSession`] and performs its effects one at a time.
///
/// Requests are awaited inline, so at most one is ever in flight.
#[derive(Debug)]
pub struct ChatDriver {
    session: ChatSession,
    client: RelayClient,
}

impl ChatDriver {
    pub fn new(client: RelayClient) -> Self {
        Self {
            session: ChatSession::new(),
            client,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Applies `event` and runs every resulting effect to completion.
    pub async fn dispatch<V: TranscriptView>(&mut self, event: Event, view: &mut V) {
        let mut pending: VecDeque<Effect> = self.session.update(event).into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::ScrollToLatest => view.scroll_to_latest(&self.session),
                Effect::SendChat(request) => {
                    debug!(messages = request.messages.len(), "posting chat");
                    let outcome = match self.client.post_chat(&request).await {
                        Ok(reply) => Event::ReplyReceived(reply.content),
                        Err(e) => {
                            warn!(error = %e, "relay call failed");
                            Event::RequestFailed(e.to_failure())
                        }
                    };
                    pending.extend(self.session.update(outcome));
                }
            }
        }
    }

    /// Types `text` into the input box and submits it.
    pub async fn send<V: TranscriptView>(&mut self, text: &str, view: &mut V) {
        self.dispatch(Event::InputChanged(text.to_string()), view)
            .await;
        self.dispatch(Event::Submit, view).await;
    }
}

/// Runs one start attempt for `launcher`. Returns whether a call was made.
pub async fn start_bot(launcher: &mut BotLauncher, client: &RelayClient) -> bool {
    if !launcher.start() {
        return false;
    }
    match client.start_bot().await {
        Ok(()) => launcher.started(),
        Err(ClientError::Status { status_text, .. }) => launcher.failed(&status_text),
        Err(e) => launcher.failed(&e.to_string()),
    }
    true
}
