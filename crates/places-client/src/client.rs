//! Places API client.
//!
//! Thin async wrapper over `reqwest`: one request per call, no retries. Every
//! endpoint answers with the `{success, data, count}` envelope; records are
//! mapped into `Place` through the same wire model the snapshot loader uses.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use place_data::{ApiEnvelope, ApiPlace, Place};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Filters for `GET /api/places`. Unset (or zero) fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl PlacesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Query-string pairs, in a fixed order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|n| *n > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        let text = [("category", &self.category), ("city", &self.city), ("country", &self.country)];
        for (key, value) in text {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

/// One page of places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacesPage {
    pub places: Vec<Place>,
    /// Server-reported total, or the page length when the server omits it
    pub count: usize,
}

/// Client for the places REST API
#[derive(Debug, Clone)]
pub struct PlacesClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl PlacesClient {
    /// Create a new client with configuration from environment
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let inner = build_http_client(&config)?;
        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// List places.
    ///
    /// GET /api/places
    pub async fn get_places(&self, query: &PlacesQuery) -> Result<PlacesPage> {
        let url = endpoint_url(&self.config.base_url, &["api", "places"], &query.to_pairs())?;
        self.fetch_page(url, "Failed to fetch places").await
    }

    /// Highly rated places.
    ///
    /// GET /api/places/featured?limit=<limit>
    pub async fn get_featured_places(&self, limit: usize) -> Result<PlacesPage> {
        let url = endpoint_url(
            &self.config.base_url,
            &["api", "places", "featured"],
            &[("limit", limit.to_string())],
        )?;
        self.fetch_page(url, "Failed to fetch featured places").await
    }

    /// Text search.
    ///
    /// GET /api/places/search?q=<query>&limit=<limit>
    pub async fn search_places(&self, query: &str, limit: Option<usize>) -> Result<PlacesPage> {
        let mut params = vec![("q", query.to_string())];
        if let Some(limit) = limit.filter(|n| *n > 0) {
            params.push(("limit", limit.to_string()));
        }
        let url = endpoint_url(&self.config.base_url, &["api", "places", "search"], &params)?;
        self.fetch_page(url, "Failed to search places").await
    }

    /// A single place.
    ///
    /// GET /api/places/<id>
    pub async fn get_place(&self, id: &str) -> Result<Place> {
        if id.trim().is_empty() {
            return Err(ClientError::MissingId);
        }
        let url = endpoint_url(&self.config.base_url, &["api", "places", id], &[])?;
        let body = match self.get_json(url).await {
            Err(e) if e.is_not_found() => return Err(ClientError::NotFound(id.to_string())),
            other => other?,
        };
        let (record, _) = decode_envelope::<ApiPlace>(body, "Failed to fetch place")?;
        Ok(Place::from(record))
    }

    /// Gallery image URLs for a place; a place without a gallery yields an
    /// empty list rather than an error.
    ///
    /// GET /api/places/<id>/gallery
    pub async fn get_place_gallery(&self, id: &str) -> Result<Vec<String>> {
        if id.trim().is_empty() {
            return Err(ClientError::MissingId);
        }
        let url = endpoint_url(&self.config.base_url, &["api", "places", id, "gallery"], &[])?;
        match self.get_json(url).await {
            Ok(body) => {
                let envelope: ApiEnvelope<Vec<String>> = serde_json::from_value(body)?;
                let succeeded = envelope.success == Some(true);
                match envelope.into_data("Failed to fetch gallery images") {
                    Ok(images) => Ok(images),
                    // `data: null` on success means no images
                    Err(_) if succeeded => Ok(Vec::new()),
                    Err(reason) => Err(ClientError::Unsuccessful(reason)),
                }
            }
            Err(e) if e.is_not_found() => {
                debug!("No gallery for place {}", id);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_page(&self, url: Url, context: &str) -> Result<PlacesPage> {
        let body = self.get_json(url).await?;
        let (records, count) = decode_envelope::<Vec<ApiPlace>>(body, context)?;
        let places: Vec<Place> = records.into_iter().map(Place::from).collect();
        let count = count.filter(|n| *n > 0).unwrap_or(places.len());
        Ok(PlacesPage { places, count })
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        let start = Instant::now();
        debug!("GET {}", url);

        let response = self.inner.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        info!(
            "GET {} -> {} in {:.1}ms",
            url.path(),
            status.as_u16(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        classify_response(status, &body)
    }
}

pub(crate) fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|_| ClientError::config(format!("invalid user agent {:?}", config.user_agent)))?;
    headers.insert(USER_AGENT, agent);

    Client::builder()
        .timeout(config.timeout)
        .default_headers(headers)
        .build()
        .map_err(ClientError::Request)
}

/// `base` joined with percent-encoded path segments and query pairs.
pub(crate) fn endpoint_url(base: &str, segments: &[&str], params: &[(&str, String)]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Turn status and body into JSON or the matching error.
///
/// Error statuses prefer the server's `detail` (FastAPI) or `message` text
/// over the bare reason phrase.
pub(crate) fn classify_response(status: StatusCode, body: &str) -> Result<Value> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            warn!("Non-JSON response ({}): {}", status.as_u16(), preview);
            ClientError::Json(e)
        });
    }

    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
    Err(ClientError::api(status.as_u16(), message))
}

/// Unwrap `{success, data, count}`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: Value, context: &str) -> Result<(T, Option<usize>)> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(body)?;
    let count = envelope.count;
    let data = envelope.into_data(context).map_err(ClientError::Unsuccessful)?;
    Ok((data, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_url_encodes_segments_and_params() {
        let url = endpoint_url("http://localhost:8000", &["api", "places", "a/b c"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/places/a%2Fb%20c");

        let url = endpoint_url(
            "https://example.com/v2/",
            &["api", "places", "search"],
            &[("q", "café & bar".to_string()), ("limit", "5".to_string())],
        )
        .unwrap();
        assert_eq!(url.path(), "/v2/api/places/search");
        assert_eq!(url.query(), Some("q=caf%C3%A9+%26+bar&limit=5"));
    }

    #[test]
    fn test_endpoint_url_without_params_has_no_query() {
        let url = endpoint_url("http://localhost:8000", &["api", "places"], &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_places_query_pairs_skip_unset_and_zero() {
        let query = PlacesQuery::new().limit(100).offset(0).country("USA").city("  ");
        assert_eq!(
            query.to_pairs(),
            vec![("limit", "100".to_string()), ("country", "USA".to_string())]
        );
        assert!(PlacesQuery::default().to_pairs().is_empty());
    }

    #[test]
    fn test_classify_success_and_non_json() {
        let value = classify_response(StatusCode::OK, r#"{"success": true, "data": []}"#).unwrap();
        assert_eq!(value["success"], json!(true));

        let err = classify_response(StatusCode::OK, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn test_classify_error_prefers_detail() {
        let err = classify_response(StatusCode::BAD_REQUEST, r#"{"detail": "limit too large"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "limit too large"));

        let err = classify_response(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, ref message } if message == "Not Found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_envelope_count_and_failure() {
        let (data, count) =
            decode_envelope::<Vec<ApiPlace>>(json!({"success": true, "data": [{"id": 1}], "count": 7}), "ctx")
                .unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(count, Some(7));

        let err = decode_envelope::<Vec<ApiPlace>>(json!({"success": false, "message": "down"}), "ctx")
            .unwrap_err();
        assert!(matches!(err, ClientError::Unsuccessful(ref m) if m == "down"));
    }

    #[test]
    fn test_decode_envelope_single_record_without_data() {
        let (place, count) =
            decode_envelope::<ApiPlace>(json!({"success": true, "data": {"id": "louvre"}}), "ctx").unwrap();
        assert_eq!(Place::from(place).id, "louvre");
        assert_eq!(count, None);

        let err = decode_envelope::<ApiPlace>(json!({"success": true}), "Failed to fetch place").unwrap_err();
        assert!(
            matches!(err, ClientError::Unsuccessful(ref m) if m == "Failed to fetch place: response carried no data")
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(PlacesClient::with_config(ClientConfig::default()).is_ok());
        assert!(PlacesClient::with_config(ClientConfig::with_base_url("localhost")).is_err());
    }

    #[tokio::test]
    async fn test_empty_id_rejected_without_request() {
        let client = PlacesClient::with_config(ClientConfig::default()).unwrap();
        assert!(matches!(client.get_place(" ").await, Err(ClientError::MissingId)));
        assert!(matches!(client.get_place_gallery("").await, Err(ClientError::MissingId)));
    }
}
