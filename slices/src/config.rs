//! Configuration management for the slice stores.
//!
//! Loads configuration from environment variables with sensible defaults.

use marketdesk_client::ClientConfig;
use marketdesk_runtime::StoreConfig;
use std::env;
use std::time::Duration;

/// Default graceful shutdown timeout
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend connection
    pub client: ClientConfig,
    /// Store runtime settings shared by every slice
    pub store: StoreSettings,
}

/// Store runtime settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Timeout used by [`marketdesk_runtime::store::Store::close`]
    pub shutdown_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl StoreSettings {
    /// Runtime config for one store
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.shutdown_timeout)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MARKETDESK_API_URL`: backend base URL (default: `http://localhost:8000/api`)
    /// - `MARKETDESK_API_TOKEN`: bearer token (default: none)
    /// - `MARKETDESK_API_TIMEOUT_SECS`: request timeout (default: transport default)
    /// - `MARKETDESK_SHUTDOWN_TIMEOUT_SECS`: graceful shutdown timeout (default: 30)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            store: StoreSettings {
                shutdown_timeout: env::var("MARKETDESK_SHUTDOWN_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map_or(DEFAULT_SHUTDOWN_TIMEOUT, Duration::from_secs),
            },
        }
    }
}
