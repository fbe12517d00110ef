//! OCN Gateway
//!
//! Reverse proxy fronting the local agent fleet. Browsers and demo tools
//! talk to one origin; the gateway fans requests out to the per-agent
//! services and normalizes errors into JSON bodies.
//!
//! ```bash
//! # Start with the default fleet ports
//! ocn-gateway
//!
//! # Override the bind address and one upstream
//! OCN_GATEWAY_ADDR=0.0.0.0:9000 OCN_ORCA_URL=http://orca.internal:8080 ocn-gateway
//! ```

mod config;
mod error;
mod proxy;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::GatewayConfig;
use crate::proxy::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = GatewayConfig::from_env()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        agents = config.agents.len(),
        "Starting OCN gateway"
    );
    for (agent, base) in &config.agents {
        tracing::debug!(%agent, %base, "upstream configured");
    }

    let addr = config.addr;
    let app = proxy::router(Arc::new(AppState::new(config)));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, %err, "failed to bind gateway address");
            return Err(err.into());
        }
    };

    tracing::info!(%addr, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway shutdown complete");

    Ok(())
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
