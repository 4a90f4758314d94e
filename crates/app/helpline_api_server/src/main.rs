//! Helpline relay server binary.
//!
//! Serves `POST /api/chat` and forwards each request to the configured
//! completion provider.

use clap::Parser;
use helpline_api::config::ApiConfig;
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "helpline_api_server", about = "Helpline chat relay server")]
struct Args {
    /// Host to bind. Overrides the host part of `BIND_ADDR`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (0 = ephemeral). Overrides the port part of `BIND_ADDR`.
    #[arg(long)]
    port: Option<u16>,

    /// Model identifier sent to the completion provider.
    #[arg(long, env = "CHAT_MODEL")]
    model: Option<String>,
}

/// Applies command-line overrides on top of the environment configuration.
fn resolve_config(args: &Args, mut config: ApiConfig) -> ApiConfig {
    if args.host.is_some() || args.port.is_some() {
        let (env_host, env_port) = config
            .bind_addr
            .rsplit_once(':')
            .unwrap_or((config.bind_addr.as_str(), "3000"));
        let host = args.host.as_deref().unwrap_or(env_host);
        let port = args
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| env_port.to_string());
        let bind_addr = format!("{host}:{port}");
        config.bind_addr = bind_addr;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    config
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,helpline_api=debug,helpline_core=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args, ApiConfig::from_env());

    if config.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; chat requests will fail until it is");
    }
    info!(
        bind_addr = %config.bind_addr,
        model = %config.model,
        provider = %config.provider_base_url,
        "starting helpline_api_server"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = helpline_api::router(helpline_api::AppState::from_config(config));

    info!(addr = %local_addr, "relay listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
