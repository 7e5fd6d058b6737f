//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use studio_shared::constants::{APP_NAME, DEFAULT_FAILURE_RATE, DEFAULT_HTTP_PORT};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Directory holding the built frontend. Unknown paths fall back to
    /// its `index.html`.
    /// Env: `STATIC_DIR`
    /// Default: `./dist`
    pub static_dir: PathBuf,

    /// Human-readable name reported by `/api/info`.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Banana Studio"`
    pub instance_name: String,

    /// Whether the mock image service sleeps before answering.
    /// Env: `SIMULATE_LATENCY` (true/false)
    /// Default: `true`
    pub simulate_latency: bool,

    /// Probability that a mock generation fails, clamped to `0.0..=1.0`.
    /// Env: `FAILURE_RATE`
    /// Default: `0.05`
    pub failure_rate: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            static_dir: PathBuf::from("./dist"),
            instance_name: APP_NAME.to_string(),
            simulate_latency: true,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("INSTANCE_NAME") {
            if !name.is_empty() {
                config.instance_name = name;
            }
        }

        if let Some(val) = lookup("SIMULATE_LATENCY") {
            config.simulate_latency = val != "false" && val != "0";
        }

        if let Some(val) = lookup("FAILURE_RATE") {
            match val.parse::<f64>() {
                Ok(rate) if rate.is_finite() => config.failure_rate = rate.clamp(0.0, 1.0),
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid FAILURE_RATE, using default"
                    );
                }
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
