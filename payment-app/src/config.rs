//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the external account authority.
    pub account_service_url: String,
    /// Timeout applied to every account authority call.
    pub account_service_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let account_service_url = env::var("ACCOUNT_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8082".to_string());

        let timeout_ms: u64 = env::var("ACCOUNT_SERVICE_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;

        Ok(Self {
            port,
            database_url,
            account_service_url,
            account_service_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
