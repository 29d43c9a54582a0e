//! Core domain types for place records.
//!
//! A `Place` is a read-only snapshot of a point of interest as served by the
//! places API. Location strings are producer-supplied and inconsistent, so
//! the filtering layer never assumes canonical spelling or casing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque unique identifier for a place
pub type PlaceId = String;

// =============================================================================
// Location Types
// =============================================================================

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Opening hours for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    pub day: String,
    pub open: String,
    pub close: String,
}

// =============================================================================
// Category
// =============================================================================

/// The closed set of top-level categories the UI knows how to present.
///
/// Place records carry a free-text label; anything outside this set
/// classifies as `Other`. Finer distinctions live in the subcategory table
/// (see [`crate::catalog`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
    Park,
    Museum,
    Nightlife,
    Event,
    Other,
}

impl PlaceCategory {
    /// Classify a producer-supplied label (case and whitespace insensitive).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "cafe" | "café" => PlaceCategory::Cafe,
            "restaurant" => PlaceCategory::Restaurant,
            "park" => PlaceCategory::Park,
            "museum" => PlaceCategory::Museum,
            "nightlife" => PlaceCategory::Nightlife,
            "event" => PlaceCategory::Event,
            _ => PlaceCategory::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::Cafe => "Cafe",
            PlaceCategory::Restaurant => "Restaurant",
            PlaceCategory::Park => "Park",
            PlaceCategory::Museum => "Museum",
            PlaceCategory::Nightlife => "Nightlife",
            PlaceCategory::Event => "Event",
            PlaceCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Place
// =============================================================================

/// A point of interest.
///
/// `distance_km` is derived: it is only set on copies produced by near-me
/// filtering and is never part of a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    /// Free-text category label, e.g. "Cafe" or "Tickets to Event"
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner_image_link: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Nominally 0-5; out-of-range values are passed through untouched
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_map_link: Option<String>,
    #[serde(default)]
    pub hours: Vec<Hours>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

fn default_visible() -> bool {
    true
}

impl Place {
    /// A minimal place; everything optional is left empty.
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            sub_category: None,
            description: String::new(),
            banner_image_link: String::new(),
            images: Vec::new(),
            rating: 0.0,
            avg_price: None,
            coordinates: None,
            address: String::new(),
            city: String::new(),
            state: None,
            country: String::new(),
            postal_code: None,
            location_map_link: None,
            hours: Vec::new(),
            amenities: Vec::new(),
            tags: Vec::new(),
            website: None,
            phone_number: None,
            review_count: 0,
            visible: true,
            last_updated: String::new(),
            distance_km: None,
        }
    }

    /// Coordinates usable for distance math, i.e. present and finite.
    pub fn position(&self) -> Option<Coordinates> {
        self.coordinates.filter(Coordinates::is_finite)
    }

    pub fn category_kind(&self) -> PlaceCategory {
        PlaceCategory::from_label(&self.category)
    }
}

// =============================================================================
// PlaceIndex - In-Memory Snapshot
// =============================================================================

/// Places held in arrival order with O(1) lookup by id.
///
/// Order matters: filters are stable and the UI treats the API order as
/// relevance order, so the index never reorders its contents.
#[derive(Debug, Clone, Default)]
pub struct PlaceIndex {
    pub(crate) places: Vec<Place>,
    pub(crate) by_id: HashMap<PlaceId, usize>,
}

impl PlaceIndex {
    /// Creates a new, empty PlaceIndex
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Get a place by ID
    pub fn get_place(&self, id: &str) -> Option<&Place> {
        self.by_id.get(id).map(|&pos| &self.places[pos])
    }

    /// All places in arrival order
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Distinct category labels, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.places.iter().map(|p| p.category.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Insert a place; a record with a known id replaces the old one in place.
    pub fn insert_place(&mut self, place: Place) {
        match self.by_id.get(&place.id) {
            Some(&pos) => self.places[pos] = place,
            None => {
                self.by_id.insert(place.id.clone(), self.places.len());
                self.places.push(place);
            }
        }
    }

    /// Consume the index, yielding places in arrival order
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }
}

impl FromIterator<Place> for PlaceIndex {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        let mut index = PlaceIndex::new();
        for place in iter {
            index.insert_place(place);
        }
        index
    }
}
