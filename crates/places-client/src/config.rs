//! Configuration for the places API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ClientError, Result};
use std::env;
use std::time::Duration;

/// Local development API
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Public OpenStreetMap reverse geocoder
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the places API (without the `/api` prefix)
    pub base_url: String,
    /// Base URL of the Nominatim-compatible reverse geocoder
    pub geocoder_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Sent with every request; Nominatim rejects anonymous clients
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("spotnere/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SPOTNERE_API_URL`: Base URL of the places API
    /// - `SPOTNERE_GEOCODER_URL`: Reverse geocoder base URL
    /// - `SPOTNERE_TIMEOUT_SECS`: Request timeout in seconds
    ///
    /// Unset variables fall back to the defaults. The result is validated.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("SPOTNERE_API_URL").unwrap_or(defaults.base_url);
        let geocoder_url = env::var("SPOTNERE_GEOCODER_URL").unwrap_or(defaults.geocoder_url);

        let timeout = match env::var("SPOTNERE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ClientError::config(format!("SPOTNERE_TIMEOUT_SECS is not a number: {raw:?}")))?,
            Err(_) => defaults.timeout,
        };

        let config = Self {
            base_url,
            geocoder_url,
            timeout,
            user_agent: defaults.user_agent,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration for a specific API URL, defaults elsewhere.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check that both URLs are http(s) and the timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("base_url", &self.base_url), ("geocoder_url", &self.geocoder_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::config(format!(
                    "{name} must start with http:// or https://, got {url:?}"
                )));
            }
            reqwest::Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
        }
        if self.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}
