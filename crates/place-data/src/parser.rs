//! Parser for the places API wire format.
//!
//! The API (and snapshots saved from it) carries snake_case records whose
//! field types drift between producers: ids arrive as strings or numbers,
//! coordinates as `latitude`/`longitude` columns or a nested object, numbers
//! as numeric strings, lists as a single string. `ApiPlace` accepts all of
//! those shapes and `Place::from` settles them into the canonical model.
//!
//! Documents are either the response envelope `{success, data, count}` or a
//! bare array of records.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Response envelope shared by every places API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub count: Option<usize>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// The payload, if the producer reported success.
    ///
    /// On failure the error carries the producer's `error` or `message`
    /// text, or `fallback` when it sent neither.
    pub fn into_data(self, fallback: &str) -> std::result::Result<T, String> {
        let reason = self
            .error
            .or(self.message)
            .unwrap_or_else(|| fallback.to_string());
        match (self.success, self.data) {
            (Some(true), Some(data)) => Ok(data),
            (Some(true), None) => Err(format!("{fallback}: response carried no data")),
            _ => Err(reason),
        }
    }
}

/// A number that may have been serialized as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    /// The numeric value, if it is (or parses to) a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberOrString::Number(n) => *n,
            NumberOrString::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A list that may have been serialized as a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Many(Vec<Value>),
    One(String),
}

impl StringList {
    /// Non-empty string entries; anything else is dropped.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            StringList::Many(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) if !s.trim().is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
            StringList::One(s) if !s.trim().is_empty() => vec![s],
            StringList::One(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCoordinates {
    #[serde(default)]
    pub lat: Option<NumberOrString>,
    #[serde(default)]
    pub lng: Option<NumberOrString>,
}

/// A place record exactly as the API serves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPlace {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub banner_image_link: Option<String>,
    #[serde(default)]
    pub images: Option<StringList>,
    #[serde(default)]
    pub image_links: Option<StringList>,
    #[serde(default)]
    pub rating: Option<NumberOrString>,
    #[serde(default)]
    pub avg_price: Option<NumberOrString>,
    #[serde(default)]
    pub latitude: Option<NumberOrString>,
    #[serde(default)]
    pub longitude: Option<NumberOrString>,
    #[serde(default)]
    pub coordinates: Option<ApiCoordinates>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub location_map_link: Option<String>,
    #[serde(default)]
    pub hours: Option<Value>,
    #[serde(default)]
    pub amenities: Option<StringList>,
    #[serde(default)]
    pub tags: Option<StringList>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "reviews_count")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn id_to_string(id: Option<Value>) -> PlaceId {
    match id {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl ApiPlace {
    /// Coordinates from the flat columns, else the nested object.
    /// Half a coordinate is no coordinate.
    fn resolve_coordinates(&self) -> Option<Coordinates> {
        let flat = self
            .latitude
            .as_ref()
            .and_then(NumberOrString::as_f64)
            .zip(self.longitude.as_ref().and_then(NumberOrString::as_f64));
        let nested = || {
            let coords = self.coordinates.as_ref()?;
            coords
                .lat
                .as_ref()
                .and_then(NumberOrString::as_f64)
                .zip(coords.lng.as_ref().and_then(NumberOrString::as_f64))
        };
        flat.or_else(nested).map(Coordinates::from)
    }
}

impl From<ApiPlace> for Place {
    fn from(api: ApiPlace) -> Self {
        let coordinates = api.resolve_coordinates();

        let mut images = api.images.map(StringList::into_strings).unwrap_or_default();
        if images.is_empty() {
            images = api.image_links.map(StringList::into_strings).unwrap_or_default();
        }
        let banner_image_link = non_empty(api.banner_image_link)
            .or_else(|| images.first().cloned())
            .unwrap_or_default();

        let hours = api
            .hours
            .and_then(|v| serde_json::from_value::<Vec<Hours>>(v).ok())
            .unwrap_or_default();

        Place {
            id: id_to_string(api.id),
            name: api.name.unwrap_or_default(),
            category: non_empty(api.category).unwrap_or_else(|| "Other".to_string()),
            sub_category: non_empty(api.sub_category),
            description: api.description.unwrap_or_default(),
            banner_image_link,
            images,
            rating: api.rating.as_ref().and_then(NumberOrString::as_f64).unwrap_or(0.0),
            avg_price: api.avg_price.as_ref().and_then(NumberOrString::as_f64),
            coordinates,
            address: api.address.unwrap_or_default(),
            city: api.city.unwrap_or_default(),
            state: non_empty(api.state),
            country: api.country.unwrap_or_default(),
            postal_code: non_empty(api.postal_code),
            location_map_link: non_empty(api.location_map_link),
            hours,
            amenities: api.amenities.map(StringList::into_strings).unwrap_or_default(),
            tags: api.tags.map(StringList::into_strings).unwrap_or_default(),
            website: non_empty(api.website),
            phone_number: non_empty(api.phone_number).or_else(|| non_empty(api.phone)),
            review_count: api.review_count.unwrap_or(0),
            visible: api.visible.unwrap_or(true),
            last_updated: api.last_updated.unwrap_or_default(),
            distance_km: None,
        }
    }
}

/// Parse a JSON document (envelope or bare array) into places.
///
/// `source` names the document in error messages.
pub fn parse_places_json(json: &str, source: &str) -> Result<Vec<Place>> {
    let document: Value = serde_json::from_str(json)?;

    let records: Vec<ApiPlace> = match document {
        Value::Array(_) => serde_json::from_value(document)?,
        Value::Object(_) => {
            let envelope: ApiEnvelope<Vec<ApiPlace>> = serde_json::from_value(document)?;
            envelope
                .into_data("Failed to fetch places")
                .map_err(DataLoadError::UnsuccessfulEnvelope)?
        }
        other => {
            return Err(DataLoadError::ParseError {
                file: source.to_string(),
                reason: format!("expected an array or an envelope object, found {}", kind_of(&other)),
            });
        }
    };

    let places: Vec<Place> = records.into_iter().map(Place::from).collect();
    let missing_coordinates = places.iter().filter(|p| p.position().is_none()).count();
    if missing_coordinates > 0 {
        warn!(
            "{}: {} of {} places have no usable coordinates",
            source,
            missing_coordinates,
            places.len()
        );
    }
    Ok(places)
}

/// Read and parse a snapshot file.
pub fn parse_places_file(path: &Path) -> Result<Vec<Place>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_places_json(&content, &path.display().to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
