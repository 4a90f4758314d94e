// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use helpline_api_client::RelayClient;
use helpline_api_client::driver::start_bot;
use helpline_core::dashboard::BotLauncher;

mod chat;
mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Chat => chat::run(&args.server).await?,
        Commands::StartBot => {
            let client = RelayClient::new(&args.server)?;
            let mut launcher = BotLauncher::new();
            start_bot(&mut launcher, &client).await;
            if let Some(message) = launcher.error() {
                return Err(Error::Custom(message.to_string()));
            }
            println!("{}", launcher.status_line());
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
