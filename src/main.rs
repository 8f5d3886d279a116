//! Edge request locator.
//!
//! Reports where a request came from, using the geolocation context the edge
//! attaches to it, optionally enriched with RDAP registry data.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────▶ CORS ─▶ request id ─▶ trace ─▶ timeout ─▶ edge context
//!                                                          │
//!                                                          ▼
//!                                                  ┌──────────────┐
//!                                                  │   routing    │
//!                                                  │ (first match)│
//!                                                  └──────┬───────┘
//!                     ┌──────────────┬──────────────┬─────┴────────┐
//!                     ▼              ▼              ▼              ▼
//!                 /ros text      /json JSON     dashboard      speed test
//!                                    │              │
//!                                    └──── registry (RDAP) ────▶ rdap.org
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_locator::config::load_with_overrides;
use edge_locator::lifecycle::{signals, Shutdown};
use edge_locator::observability::{logging, metrics};
use edge_locator::HttpServer;

#[derive(Parser)]
#[command(name = "edge-locator")]
#[command(about = "Reports the location of incoming requests", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_with_overrides(cli.config.as_deref(), cli.bind.as_deref())?;

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "edge-locator starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        registry = %config.registry.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        trust_edge_headers = config.edge.trust_headers,
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

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
