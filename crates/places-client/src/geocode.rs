//! Reverse geocoding: coordinates to country, state and city.
//!
//! Talks to a Nominatim-compatible `/reverse` endpoint. Address fields vary
//! by region (a small place reports `village` where a big one reports
//! `city`), so each component is taken from the first field present.

use crate::client::{build_http_client, classify_response, endpoint_url};
use crate::config::ClientConfig;
use crate::error::Result;
use place_data::normalize_country;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the user is, as far as place lookups are concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl UserLocation {
    /// A position with no administrative names yet.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            country: None,
            state: None,
            city: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_blank(Some(city.into()));
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_blank(Some(state.into()));
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = non_blank(Some(normalize_country(&country.into())));
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    region: Option<String>,
    province: Option<String>,
    country: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl NominatimAddress {
    fn into_location(self, latitude: f64, longitude: f64) -> UserLocation {
        let city = non_blank(self.city)
            .or_else(|| non_blank(self.town))
            .or_else(|| non_blank(self.village))
            .or_else(|| non_blank(self.municipality));
        let state = non_blank(self.state)
            .or_else(|| non_blank(self.region))
            .or_else(|| non_blank(self.province));
        let country = non_blank(self.country).map(|c| normalize_country(&c));

        UserLocation {
            latitude,
            longitude,
            country,
            state,
            city,
        }
    }
}

/// Reverse geocoding client
#[derive(Debug, Clone)]
pub struct Geocoder {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl Geocoder {
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let inner = build_http_client(&config)?;
        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Resolve coordinates to a [`UserLocation`].
    ///
    /// GET /reverse?format=json&lat=<lat>&lon=<lon>&zoom=10&addressdetails=1
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<UserLocation> {
        let url = endpoint_url(
            &self.config.geocoder_url,
            &["reverse"],
            &[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "10".to_string()),
                ("addressdetails", "1".to_string()),
            ],
        )?;
        debug!("Reverse geocoding via {}", url);

        let response = self.inner.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let response: NominatimResponse = serde_json::from_value(classify_response(status, &body)?)?;

        let location = response.address.into_location(latitude, longitude);
        info!(
            "Resolved ({:.4}, {:.4}) to city={:?} state={:?} country={:?}",
            latitude, longitude, location.city, location.state, location.country
        );
        Ok(location)
    }
}
