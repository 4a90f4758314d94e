//! In-memory chat transcript.
//!
//! The transcript is an append/replace-only log. Each user message is paired
//! with an assistant placeholder whose position is captured when it is
//! created, so the reply lands in that exact entry no matter what else the
//! caller does with the log afterwards.

use thiserror::Error;

use crate::message::{Message, Role};

/// Greeting every transcript starts with.
pub const GREETING: &str = "Hi! I'm the Customer Support Assistant. How can I help you today?";

/// Errors raised when a placeholder handle is misused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Placeholder {0} does not exist")]
    UnknownPlaceholder(usize),

    #[error("Placeholder {0} was already filled")]
    AlreadyFilled(usize),
}

/// Handle to an empty assistant entry awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    index: usize,
}

impl Placeholder {
    /// Position of the placeholder in the transcript.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered chat log, owned by a single session.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    filled: Vec<bool>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Creates a transcript holding only the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            filled: vec![true],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the greeting is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a user message followed by an empty assistant placeholder.
    pub fn push_exchange(&mut self, user_text: impl Into<String>) -> Placeholder {
        self.messages.push(Message::user(user_text));
        self.filled.push(true);

        let index = self.messages.len();
        self.messages.push(Message::assistant(String::new()));
        self.filled.push(false);

        Placeholder { index }
    }

    /// Replaces the placeholder's content in place.
    pub fn fill(
        &mut self,
        placeholder: Placeholder,
        content: impl Into<String>,
    ) -> Result<(), TranscriptError> {
        let index = placeholder.index;
        let filled = self
            .filled
            .get_mut(index)
            .ok_or(TranscriptError::UnknownPlaceholder(index))?;
        if *filled {
            return Err(TranscriptError::AlreadyFilled(index));
        }
        debug_assert_eq!(self.messages[index].role, Role::Assistant);

        self.messages[index].content = content.into();
        *filled = true;
        Ok(())
    }

    /// Conversation sent to the relay for a placeholder: everything before it.
    pub fn history_for(&self, placeholder: Placeholder) -> Vec<Message> {
        let end = placeholder.index.min(self.messages.len());
        self.messages[..end].to_vec()
    }
}
