//! # studio-server
//!
//! HTTP front door for Banana Studio.
//!
//! This binary provides:
//! - **Static file serving** for the built frontend, with every unknown path
//!   resolving to `index.html` so client-side routes work on reload
//! - **REST API** (axum): health check, server info, model and preset
//!   catalogs, and stateless `generate` / `edit` endpoints backed by the mock
//!   image service

mod api;
mod config;
mod error;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use studio_service::{MockConfig, MockImageService};

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,studio_server=debug,studio_service=debug")
            }),
        )
        .init();

    info!("Starting Banana Studio server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    if !config.static_dir.join("index.html").exists() {
        tracing::warn!(
            dir = %config.static_dir.display(),
            "No index.html in static directory, frontend routes will 404"
        );
    }

    // -----------------------------------------------------------------------
    // 3. Initialize the image service
    // -----------------------------------------------------------------------
    let service = MockImageService::new(MockConfig {
        simulate_latency: config.simulate_latency,
        failure_rate: config.failure_rate,
    });

    let http_addr = config.http_addr;
    let app_state = AppState {
        service: Arc::new(service),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
