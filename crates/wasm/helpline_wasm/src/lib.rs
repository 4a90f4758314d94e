//! Browser bindings for the chat widget and the dashboard.
//!
//! The page owns `fetch`; these types only hold state. A typical send:
//!
//! ```js
//! widget.set_input(box.value);
//! const body = widget.submit();
//! if (body !== undefined) {
//!   render();
//!   try {
//!     const res = await fetch("/api/chat", { method: "POST", headers, body });
//!     if (!res.ok) throw new Error(`Network response was not ok: ${res.statusText}`);
//!     widget.receive_reply((await res.json()).content ?? "");
//!   } catch (e) {
//!     widget.receive_failure(String(e.message));
//!   }
//!   render();
//! }
//! ```

use helpline_core::dashboard::BotLauncher;
use helpline_core::failure::RelayFailure;
use helpline_core::session::{ChatSession, Effect, Event};
use wasm_bindgen::prelude::*;

/// Returns the version of the helpline-wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    helpline_core::version().to_string()
}

/// Chat widget state for a browser page.
#[wasm_bindgen]
#[derive(Default)]
pub struct ChatWidget {
    session: ChatSession,
    scroll_pending: bool,
}

#[wasm_bindgen]
impl ChatWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChatWidget {
        ChatWidget::default()
    }

    pub fn set_input(&mut self, text: String) {
        self.apply(Event::InputChanged(text));
    }

    /// Submits the input box. Returns the JSON body to POST to `/api/chat`,
    /// or `undefined` when nothing should be sent.
    pub fn submit(&mut self) -> Option<String> {
        self.apply(Event::Submit)
    }

    /// Retry action of the error notification. Resubmits the current input box.
    pub fn retry(&mut self) -> Option<String> {
        self.apply(Event::Retry)
    }

    pub fn receive_reply(&mut self, content: String) {
        self.apply(Event::ReplyReceived(content));
    }

    /// Reports a failed call by its error message, e.g. `Failed to fetch`.
    pub fn receive_failure(&mut self, description: String) {
        self.apply(Event::RequestFailed(RelayFailure::from_description(
            &description,
        )));
    }

    pub fn dismiss_error(&mut self) {
        self.apply(Event::DismissError);
    }

    /// Transcript as a JSON array of `{role, content}`.
    pub fn transcript_json(&self) -> String {
        serde_json::to_string(self.session.transcript().messages())
            .unwrap_or_else(|_| "[]".to_string())
    }

    pub fn input(&self) -> String {
        self.session.input().to_string()
    }

    pub fn error(&self) -> Option<String> {
        self.session.error().map(str::to_string)
    }

    pub fn is_sending(&self) -> bool {
        self.session.is_sending()
    }

    pub fn can_submit(&self) -> bool {
        self.session.can_submit()
    }

    /// Whether the transcript changed since the last call; the page should
    /// scroll its newest message into view when this returns true.
    pub fn take_scroll(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

impl ChatWidget {
    /// Feeds one event to the session; returns the request body to send, if any.
    fn apply(&mut self, event: Event) -> Option<String> {
        let mut body = None;
        for effect in self.session.update(event) {
            match effect {
                Effect::ScrollToLatest => self.scroll_pending = true,
                Effect::SendChat(request) => body = serde_json::to_string(&request).ok(),
            }
        }
        body
    }
}

/// Dashboard "Start Bot" control for a browser page.
#[wasm_bindgen]
#[derive(Default)]
pub struct BotDashboard {
    launcher: BotLauncher,
}

#[wasm_bindgen]
impl BotDashboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BotDashboard {
        BotDashboard::default()
    }

    /// Returns true when the page should now `POST /api/start-bot`.
    pub fn start(&mut self) -> bool {
        self.launcher.start()
    }

    pub fn started(&mut self) {
        self.launcher.started();
    }

    pub fn failed(&mut self, status_text: String) {
        self.launcher.failed(&status_text);
    }

    pub fn dismiss_error(&mut self) {
        self.launcher.dismiss_error();
    }

    pub fn is_running(&self) -> bool {
        self.launcher.is_running()
    }

    pub fn is_loading(&self) -> bool {
        self.launcher.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.launcher.error().map(str::to_string)
    }

    pub fn status_line(&self) -> String {
        self.launcher.status_line().to_string()
    }

    pub fn button_label(&self) -> String {
        self.launcher.button_label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn submit_returns_request_body() {
        let mut widget = ChatWidget::new();
        widget.set_input("Hello".into());
        let body = widget.submit().expect("body");

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "Hello"}));
        assert!(widget.is_sending());
        assert!(widget.take_scroll());
        assert!(!widget.take_scroll());
    }

    #[test]
    fn failed_to_fetch_shows_unreachable() {
        let mut widget = ChatWidget::new();
        widget.set_input("Hello".into());
        widget.submit();
        widget.receive_failure("TypeError: Failed to fetch".into());

        assert_eq!(
            widget.error().as_deref(),
            Some("The server is currently unreachable. Please try again later.")
        );
        let transcript: Value = serde_json::from_str(&widget.transcript_json()).unwrap();
        assert_eq!(transcript.as_array().map(Vec::len), Some(3));
        assert_eq!(
            transcript[2]["content"],
            "The server is currently unreachable. Please try again later."
        );
    }

    #[test]
    fn empty_reply_settles_the_widget() {
        let mut widget = ChatWidget::new();
        widget.set_input("Hello".into());
        widget.submit();
        widget.receive_reply(String::new());

        assert!(!widget.is_sending());
        assert_eq!(widget.error(), None);
        let transcript: Value = serde_json::from_str(&widget.transcript_json()).unwrap();
        assert_eq!(transcript[2], json!({"role": "assistant", "content": ""}));
    }

    #[test]
    fn blank_submit_sends_nothing() {
        let mut widget = ChatWidget::new();
        widget.set_input("  ".into());
        assert!(widget.submit().is_none());
        assert!(!widget.take_scroll());
    }

    #[test]
    fn dashboard_labels_follow_state() {
        let mut dashboard = BotDashboard::new();
        assert!(dashboard.start());
        assert_eq!(dashboard.button_label(), "Starting...");
        dashboard.started();
        assert_eq!(dashboard.button_label(), "Bot Running");
    }
}
