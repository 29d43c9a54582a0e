//! City, state and country filters.
//!
//! All three fail closed: an empty query returns nothing rather than
//! everything. Explore treats an unset field as "no filter" by not adding
//! the stage at all.

use crate::matching::{normalize, overlaps};
use crate::traits::Filter;
use place_data::{country_aliases, Place};

/// Places whose city equals or overlaps `city` (either containment direction).
pub fn filter_by_city(places: &[Place], city: &str) -> Vec<Place> {
    let query = normalize(city);
    if query.is_empty() {
        return Vec::new();
    }
    places
        .iter()
        .filter(|place| overlaps(&normalize(&place.city), &query))
        .cloned()
        .collect()
}

/// Places whose state equals `state` exactly (case-insensitive).
///
/// Containment is not accepted: "Virginia" must not match "West Virginia".
pub fn filter_by_state(places: &[Place], state: &str) -> Vec<Place> {
    let query = normalize(state);
    if query.is_empty() {
        return Vec::new();
    }
    places
        .iter()
        .filter(|place| {
            place
                .state
                .as_deref()
                .is_some_and(|s| normalize(s) == query)
        })
        .cloned()
        .collect()
}

/// Places in `country`, resolving common aliases ("USA", "United States").
///
/// When the query belongs to an alias group only group members match; the
/// substring fallback applies to names outside every group.
pub fn filter_by_country(places: &[Place], country: &str) -> Vec<Place> {
    let query = normalize(country);
    if query.is_empty() {
        return Vec::new();
    }
    let group = country_aliases(&query);
    places
        .iter()
        .filter(|place| {
            let field = normalize(&place.country);
            match group {
                Some(group) => !field.is_empty() && (field == query || group.contains(&field.as_str())),
                None => overlaps(&field, &query),
            }
        })
        .cloned()
        .collect()
}

/// [`filter_by_city`] as a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFilter {
    city: String,
}

impl CityFilter {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

impl Filter for CityFilter {
    fn name(&self) -> &str {
        "CityFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        filter_by_city(&places, &self.city)
    }
}

/// [`filter_by_state`] as a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFilter {
    state: String,
}

impl StateFilter {
    pub fn new(state: impl Into<String>) -> Self {
        Self { state: state.into() }
    }
}

impl Filter for StateFilter {
    fn name(&self) -> &str {
        "StateFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        filter_by_state(&places, &self.state)
    }
}

/// [`filter_by_country`] as a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFilter {
    country: String,
}

impl CountryFilter {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }
}

impl Filter for CountryFilter {
    fn name(&self) -> &str {
        "CountryFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        filter_by_country(&places, &self.country)
    }
}
