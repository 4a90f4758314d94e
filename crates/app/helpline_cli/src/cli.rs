use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "helpline", version, about = "Helpline customer-support chat")]
pub struct Cli {
    /// Relay server origin.
    #[arg(
        long,
        global = true,
        env = "HELPLINE_SERVER",
        default_value = "http://127.0.0.1:3000"
    )]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the support assistant. Reads one message per line from stdin.
    Chat,
    /// Start the support bot from the dashboard endpoint.
    StartBot,
    /// Print the version.
    Version,
}
