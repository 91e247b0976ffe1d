//! Game Metadata Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │               GAME METADATA PROXY             │
//!                    │                                               │
//!   GET /search/:q   │  ┌─────────┐    ┌─────────┐    ┌──────────┐   │
//!   ─────────────────┼─▶│  http   │───▶│ catalog │───▶│ upstream │───┼──▶ GraphQL API
//!   GET /details/:s  │  │handlers │    │ service │    │  client  │   │   (persisted
//!                    │  └────┬────┘    └─────────┘    └──────────┘   │    queries)
//!   JSON response    │       │         ┌─────────┐                   │
//!   ◀────────────────┼───────┴─────────│ mapper  │                   │
//!                    │                 └─────────┘                   │
//!                    │  config · observability · lifecycle           │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use game_metadata_proxy::config::{load_config, ProxyConfig};
use game_metadata_proxy::http::HttpServer;
use game_metadata_proxy::lifecycle::{spawn_signal_handler, Shutdown};
use game_metadata_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "game-metadata-proxy")]
#[command(about = "HTTP proxy for game search and details", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("game-metadata-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.endpoint,
        region = %config.upstream.region,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
