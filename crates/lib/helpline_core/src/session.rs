//! Chat client session — the state machine behind the chat widget.
//!
//! The session performs no I/O. Hosts feed it [`Event`]s through
//! [`ChatSession::update`] and carry out the [`Effect`]s it returns: posting
//! a [`ChatRequest`] to the relay and scrolling the view to the newest
//! message. The outcome of a request comes back as another event.
//!
//! ```text
//!   Idle ──Submit──▶ Sending ──ReplyReceived──▶ Idle
//!                       │
//!                       └──RequestFailed──▶ Error ──Retry──▶ Sending
//!                                             └──DismissError──▶ Idle
//! ```

use tracing::{debug, warn};

use crate::failure::RelayFailure;
use crate::message::Message;
use crate::relay::ChatRequest;
use crate::transcript::{Placeholder, Transcript};

/// Text shown in place of an assistant message that has no content yet.
pub const PENDING_TEXT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    Error,
}

/// Inputs to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input box now holds this text.
    InputChanged(String),
    /// Send button pressed or Enter typed.
    Submit,
    /// The relay answered with this reply.
    ReplyReceived(String),
    /// The relay call failed.
    RequestFailed(RelayFailure),
    /// Retry action on the error notification.
    Retry,
    /// Error notification closed.
    DismissError,
}

/// Work the host must perform on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST this request to the relay and report back with
    /// [`Event::ReplyReceived`] or [`Event::RequestFailed`].
    SendChat(ChatRequest),
    /// The transcript changed; bring the newest message into view.
    ScrollToLatest,
}

/// One chat widget's worth of state.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Transcript,
    input: String,
    error: Option<String>,
    in_flight: Option<Placeholder>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Active error notification text, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.is_some() {
            SessionState::Sending
        } else if self.error.is_some() {
            SessionState::Error
        } else {
            SessionState::Idle
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the send affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_sending() && !self.input.trim().is_empty()
    }

    /// Applies one event and returns the effects the host must run.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::InputChanged(text) => {
                // The input box is disabled while a request is in flight.
                if !self.is_sending() {
                    self.input = text;
                }
                Vec::new()
            }
            Event::Submit => self.submit(),
            Event::ReplyReceived(content) => self.settle(content),
            Event::RequestFailed(failure) => {
                if !self.is_sending() {
                    debug!(%failure, "ignoring failure with no request in flight");
                    return Vec::new();
                }
                let message = failure.user_message();
                warn!(%failure, "chat request failed");
                self.error = Some(message.to_string());
                self.settle(message.to_string())
            }
            Event::Retry => {
                if self.is_sending() {
                    return Vec::new();
                }
                self.error = None;
                // Retry resubmits whatever is in the input box now; the
                // message that failed is not replayed.
                if self.input.trim().is_empty() {
                    warn!("retry requested with an empty input box; nothing to resend");
                }
                self.submit()
            }
            Event::DismissError => {
                self.error = None;
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.is_sending() {
            debug!("submit ignored: a request is already in flight");
            return Vec::new();
        }
        let text = self.input.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let text = text.to_string();

        self.input.clear();
        self.error = None;

        let placeholder = self.transcript.push_exchange(text);
        self.in_flight = Some(placeholder);

        let request = ChatRequest {
            messages: self.transcript.history_for(placeholder),
        };
        vec![Effect::ScrollToLatest, Effect::SendChat(request)]
    }

    fn settle(&mut self, content: String) -> Vec<Effect> {
        let Some(placeholder) = self.in_flight.take() else {
            debug!("ignoring reply with no request in flight");
            return Vec::new();
        };
        match self.transcript.fill(placeholder, content) {
            Ok(()) => vec![Effect::ScrollToLatest],
            Err(e) => {
                warn!(error = %e, "could not fill assistant placeholder");
                Vec::new()
            }
        }
    }
}

/// Text to render for a message; empty placeholders show [`PENDING_TEXT`].
pub fn display_content(message: &Message) -> &str {
    if message.content.is_empty() {
        PENDING_TEXT
    } else {
        &message.content
    }
}
