//! Support dashboard — starts the support bot through an external endpoint.

use tracing::error;

/// Notification shown when the bot could not be started.
pub const START_FAILED_MESSAGE: &str = "Failed to start the bot. Please try again.";

/// State of the dashboard's "Start Bot" control.
#[derive(Debug, Clone, Default)]
pub struct BotLauncher {
    running: bool,
    loading: bool,
    error: Option<String>,
}

impl BotLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Begins a start attempt. Returns `true` when the host should now call
    /// the start endpoint; `false` when the bot is already running or a
    /// start is in progress.
    pub fn start(&mut self) -> bool {
        if self.running || self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// The start endpoint answered with a success status.
    pub fn started(&mut self) {
        self.loading = false;
        self.running = true;
    }

    /// The start endpoint failed or answered with a non-success status.
    pub fn failed(&mut self, status_text: &str) {
        error!("Failed to start the bot: {status_text}");
        self.loading = false;
        self.error = Some(START_FAILED_MESSAGE.to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn status_line(&self) -> &'static str {
        if self.running {
            "The bot is currently running. You can start chatting anytime."
        } else {
            "Click the button below to start the AI Support Bot."
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Starting..."
        } else if self.running {
            "Bot Running"
        } else {
            "Start Bot"
        }
    }
}
