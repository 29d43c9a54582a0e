//! Ordering, featured selection and text search.

use crate::matching::normalize;
use place_data::Place;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum rating for a place to be featured.
pub const FEATURED_MIN_RATING: f64 = 4.5;

/// How Explore orders its results. Every order is a stable sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Keep input order
    #[default]
    Relevance,
    /// Nearest first; places without a distance go last
    Distance,
    /// Highest rated first
    Rating,
    /// Most reviewed first
    Popularity,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Relevance,
        SortOrder::Distance,
        SortOrder::Rating,
        SortOrder::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Distance => "distance",
            SortOrder::Rating => "rating",
            SortOrder::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order '{0}' (expected relevance, distance, rating or popularity)")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Reorder `places` by `order`.
pub fn sort_places(mut places: Vec<Place>, order: SortOrder) -> Vec<Place> {
    match order {
        SortOrder::Relevance => {}
        SortOrder::Distance => places.sort_by(|a, b| {
            let a = a.distance_km.unwrap_or(f64::INFINITY);
            let b = b.distance_km.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        }),
        SortOrder::Rating => places.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::Popularity => places.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
    }
    places
}

/// Highest-rated places at or above [`FEATURED_MIN_RATING`], at most `limit`.
pub fn featured_places(places: &[Place], limit: usize) -> Vec<Place> {
    let featured: Vec<Place> = places
        .iter()
        .filter(|p| p.rating >= FEATURED_MIN_RATING)
        .cloned()
        .collect();
    let mut featured = sort_places(featured, SortOrder::Rating);
    featured.truncate(limit);
    featured
}

/// Case-insensitive substring search over name, description and city.
///
/// Name matches come first, then description-only matches, then city-only
/// matches; each tier is ordered by descending rating. A place appears once,
/// in the first tier it matches. A `limit` of `Some(0)` is the same as `None`.
pub fn search_places(places: &[Place], query: &str, limit: Option<usize>) -> Vec<Place> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let fields: [fn(&Place) -> &str; 3] = [name_of, description_of, city_of];
    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for field in fields {
        let tier: Vec<Place> = places
            .iter()
            .filter(|p| normalize(field(p)).contains(&query))
            .filter(|p| seen.insert(p.id.as_str()))
            .cloned()
            .collect();
        results.extend(sort_places(tier, SortOrder::Rating));
    }

    // zero means no limit, as the backend reads it
    if let Some(limit) = limit.filter(|n| *n > 0) {
        results.truncate(limit);
    }
    results
}

fn name_of(place: &Place) -> &str {
    &place.name
}

fn description_of(place: &Place) -> &str {
    &place.description
}

fn city_of(place: &Place) -> &str {
    &place.city
}
