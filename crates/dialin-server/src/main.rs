use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use dialin_server::config::{ServerConfig, API_KEY_VAR};
use dialin_server::{build_router, AppState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "dialin-server")]
#[command(about = "HTTP API for espresso dial-in guidance and recipe generation")]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

/// Console logging, filtered by RUST_LOG.
fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_telemetry();

    let config = ServerConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("{} not set; recipe requests will fail", API_KEY_VAR);
    }

    let app = build_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("bind {}", cli.bind))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
