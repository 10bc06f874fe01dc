//! Client configuration loaded from the environment

use std::env;
use std::time::Duration;

/// Base URL used when `MARKETDESK_API_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Backend connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute base URL every endpoint path is appended to
    pub base_url: String,
    /// Bearer token, if the session is authenticated
    pub token: Option<String>,
    /// Per-request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config for `base_url` with no token and no timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: None,
        }
    }

    /// Load from `MARKETDESK_API_URL`, `MARKETDESK_API_TOKEN` and
    /// `MARKETDESK_API_TIMEOUT_SECS`.
    ///
    /// Unset or unparsable values fall back to defaults. An empty token is
    /// treated as no token.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("MARKETDESK_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: env::var("MARKETDESK_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            timeout: env::var("MARKETDESK_API_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Set the bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
