//! Error types for the backend API client
//!
//! `Display` is the user-facing message a slice stores. Transport and decode
//! details are kept in fields for logging only.

use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Configured base URL is not an absolute http(s) URL
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// Connection, DNS, TLS, or other transport failure
    #[error("Network Error")]
    Network {
        /// Transport error text
        detail: String,
    },

    /// The transport timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// 401 from the backend
    #[error("Unauthenticated.")]
    Unauthorized,

    /// Any other non-2xx response
    #[error("{}", status_message(.status, .message))]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the JSON error body, when present
        message: Option<String>,
    },

    /// Body was not JSON
    #[error("Unexpected response from server")]
    Decode {
        /// Parser error text
        detail: String,
    },

    /// Envelope came back with `success: false`
    #[error("{}", unsuccessful_message(.message))]
    Unsuccessful {
        /// Envelope `message`, when present
        message: Option<String>,
    },
}

impl ApiError {
    /// HTTP status behind this error, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short tag used as a metrics label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBaseUrl(_) | Self::Build(_) => "config",
            Self::Network { .. } => "network",
            Self::Timeout => "timeout",
            Self::Unauthorized => "unauthorized",
            Self::Api { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::Unsuccessful { .. } => "unsuccessful",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode {
                detail: error.to_string(),
            }
        } else {
            Self::Network {
                detail: error.to_string(),
            }
        }
    }
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => message.clone(),
        _ => format!("Request failed with status code {status}"),
    }
}

fn unsuccessful_message(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => message.clone(),
        _ => "Request was not successful".to_string(),
    }
}
