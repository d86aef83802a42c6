//! # Cheapware Storefront Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tracing ──► StorefrontConfig::load ──► Store::open ──► AppState        │
//! │                                                            │            │
//! │                         TcpListener ◄── build_router ◄─────┘            │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  axum::serve until Ctrl+C / SIGTERM                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use cheapware_store::Store;
use storefront_api::{build_router, init_tracing, AppState, StorefrontConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Cheapware storefront...");

    let config = StorefrontConfig::load().context("Failed to load configuration")?;
    info!(
        addr = %config.server.bind_address(),
        carts = ?config.storage.carts,
        "Configuration loaded"
    );

    let store = Store::open(config.store_config())
        .await
        .context("Failed to open store")?;
    info!(products = store.products().count().await, "Catalog loaded");

    let state = Arc::new(AppState::new(store, config.checkout_settings()));
    let app = build_router(state, &config.server.cors_origins);

    let bind_addr = config.server.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!(addr = %bind_addr, "Storefront API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
