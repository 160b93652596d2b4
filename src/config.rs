//! Configuration loader for the sump dashboard client.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env_num {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Base URL of the sump monitor backend (no trailing slash).
    pub backend_url: String,

    /// TCP port the local dashboard page is served on.
    pub port: u16,

    /// Seconds between scheduled refresh cycles.
    pub refresh_secs: u64,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `SUMP_BACKEND_URL` – base URL of the sump monitor backend
///
/// Optional:
/// - `DASHBOARD_PORT` – local dashboard port (default: 8080)
/// - `REFRESH_INTERVAL_SECS` – seconds between refresh cycles (default: 300)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let backend_url = require_env!("SUMP_BACKEND_URL")
        .trim_end_matches('/')
        .to_string();
    let port = parse_env_num!("DASHBOARD_PORT", u16, 8080);
    let refresh_secs = parse_env_num!("REFRESH_INTERVAL_SECS", u64, 300);

    if refresh_secs == 0 {
        return Err(anyhow!("REFRESH_INTERVAL_SECS must be at least 1"));
    }

    Ok(Config {
        backend_url,
        port,
        refresh_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  SUMP_BACKEND_URL      : {}", self.backend_url);
        tracing::info!("  DASHBOARD_PORT        : {}", self.port);
        tracing::info!("  REFRESH_INTERVAL_SECS : {}", self.refresh_secs);
    }
}
