//! Interactive chat loop.
//!
//! Each stdin line is typed into the input box and submitted, like pressing
//! Enter in the widget. Lines starting with `/` are widget actions.

use std::io::Write;

use helpline_api_client::RelayClient;
use helpline_api_client::driver::{ChatDriver, TranscriptView};
use helpline_core::Role;
use helpline_core::session::{ChatSession, Event, display_content};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Result;

const HELP: &str = "Commands: /retry (resends the input box, empty after each line)  /dismiss  /quit";

const NOTHING_TO_RESEND: &str = "Nothing to resend: type the message again to send it.";

/// Hint printed for `/retry` when the input box holds nothing to resend.
fn retry_hint(session: &ChatSession) -> Option<&'static str> {
    session
        .input()
        .trim()
        .is_empty()
        .then_some(NOTHING_TO_RESEND)
}

/// Prints transcript entries as they appear or change.
pub struct TerminalView<W: Write> {
    out: W,
    shown: Vec<String>,
    notified: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Vec::new(),
            notified: None,
        }
    }

    fn render(&mut self, session: &ChatSession) -> std::io::Result<()> {
        for (index, message) in session.transcript().messages().iter().enumerate() {
            let text = display_content(message);
            if self.shown.get(index).map(String::as_str) == Some(text) {
                continue;
            }
            let who = match message.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            writeln!(self.out, "{who}> {text}")?;
            if index < self.shown.len() {
                self.shown[index] = text.to_string();
            } else {
                self.shown.push(text.to_string());
            }
        }
        self.notify(session)
    }

    fn notify(&mut self, session: &ChatSession) -> std::io::Result<()> {
        let error = session.error().map(str::to_string);
        if error != self.notified {
            if let Some(message) = &error {
                writeln!(self.out, "[error] {message} (/retry, /dismiss)")?;
            }
            self.notified = error;
        }
        self.out.flush()
    }
}

impl<W: Write> TranscriptView for TerminalView<W> {
    fn scroll_to_latest(&mut self, session: &ChatSession) {
        if let Err(e) = self.render(session) {
            log::warn!("failed to render transcript: {e}");
        }
    }
}

/// Runs the chat loop until `/quit` or end of input.
pub async fn run(server: &str) -> Result<()> {
    let client = RelayClient::new(server)?;
    let mut driver = ChatDriver::new(client);
    let mut view = TerminalView::new(std::io::stdout());

    view.render(driver.session())?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/retry" => {
                if let Some(hint) = retry_hint(driver.session()) {
                    println!("{hint}");
                }
                driver.dispatch(Event::Retry, &mut view).await;
                view.notify(driver.session())?;
            }
            "/dismiss" => {
                driver.dispatch(Event::DismissError, &mut view).await;
                view.notify(driver.session())?;
            }
            _ => driver.send(&line, &mut view).await,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use helpline_core::failure::RelayFailure;

    use super::*;

    fn output(view: &TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.out.clone()).unwrap()
    }

    #[test]
    fn renders_new_and_changed_entries_once() {
        let mut session = ChatSession::new();
        let mut view = TerminalView::new(Vec::new());
        view.render(&session).unwrap();

        session.update(Event::InputChanged("Hello".into()));
        session.update(Event::Submit);
        view.render(&session).unwrap();
        session.update(Event::ReplyReceived("Hi, how can I help?".into()));
        view.render(&session).unwrap();

        let out = output(&view);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("assistant> Hi! I'm the Customer Support Assistant."));
        assert_eq!(lines[1], "you> Hello");
        assert_eq!(lines[2], "assistant> ...");
        assert_eq!(lines[3], "assistant> Hi, how can I help?");
    }

    #[test]
    fn error_is_announced_once() {
        let mut session = ChatSession::new();
        let mut view = TerminalView::new(Vec::new());
        session.update(Event::InputChanged("Hello".into()));
        session.update(Event::Submit);
        session.update(Event::RequestFailed(RelayFailure::Unexpected("x".into())));
        view.render(&session).unwrap();
        view.render(&session).unwrap();

        let out = output(&view);
        assert_eq!(out.matches("[error]").count(), 1);
    }

    #[test]
    fn retry_hint_only_when_input_box_is_empty() {
        let mut session = ChatSession::new();
        session.update(Event::InputChanged("Hello".into()));
        session.update(Event::Submit);
        session.update(Event::RequestFailed(RelayFailure::Unexpected("x".into())));
        assert_eq!(retry_hint(&session), Some(NOTHING_TO_RESEND));

        session.update(Event::InputChanged("Hello again".into()));
        assert_eq!(retry_hint(&session), None);
    }
}
