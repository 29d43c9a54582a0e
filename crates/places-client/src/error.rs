//! Error types for the places API client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Places API client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: DNS, connect, timeout, TLS
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not the JSON we expected
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx status, but the envelope reported `success: false`
    #[error("API reported failure: {0}")]
    Unsuccessful(String),

    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("Place ID is required")]
    MissingId,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// 404 from the API, or a lookup that found nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api { status: 404, .. })
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}
