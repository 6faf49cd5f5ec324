//! CoffeeChat API gateway
//!
//! A thin gateway in front of the CoffeeChat back-end services, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────┐
//!                          │                    GATEWAY                       │
//!     Browser              │  ┌─────────┐    ┌──────────────┐    ┌─────────┐  │
//!     ─────────────────────┼─▶│  http   │───▶│ /api routes  │───▶│  proxy  │──┼──▶ User / Location /
//!                          │  │ server  │    │ (explicit)   │    │ client  │  │    Notification service
//!                          │  └────┬────┘    └──────────────┘    └─────────┘  │
//!                          │       │         ┌──────────────┐                 │
//!                          │       ├────────▶│   rewrite    │─────────────────┼──▶ *_API targets
//!                          │       │         │  (fallback)  │                 │
//!                          │       │         └──────────────┘                 │
//!                          │       │         ┌──────────────┐    ┌─────────┐  │
//!                          │       └────────▶│ /demo routes │───▶│  store  │──┼──▶ JSON file / memory
//!                          │                 └──────────────┘    └─────────┘  │
//!                          │  config · observability · lifecycle · admin      │
//!                          └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use coffeechat_gateway::config::{load_config, schema::ObservabilityConfig};
use coffeechat_gateway::lifecycle::{launch, signals::wait_for_signal};
use coffeechat_gateway::observability::{logging::init_logging, metrics::init_metrics};

#[derive(Parser)]
#[command(name = "coffeechat-gateway")]
#[command(about = "API gateway for the CoffeeChat services", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults and environment apply without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    init_logging(&config.observability);

    tracing::info!("coffeechat-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        store = config.store.path.as_deref().unwrap_or("memory"),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let gateway = launch(config).await?;
    tracing::info!(address = %gateway.addr, "Listening for connections");

    wait_for_signal().await;
    gateway.stop().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
