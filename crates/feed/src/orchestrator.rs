//! # Home Feed
//!
//! Builds the landing-page carousels for a user location:
//! 1. Fetch up to 100 places for the user's country (all places if unknown)
//! 2. Derive each carousel from that one list
//! 3. Truncate every carousel to 9 places
//!
//! A carousel whose input is unknown (no coordinates, city, state or
//! country) is empty rather than unfiltered. When all four are unknown a
//! "Featured places" carousel of the first fetched places stands in.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use place_data::Place;
use place_filters::{
    filter_by_category_and_state, filter_by_city, filter_by_country, filter_by_state,
    filter_near_me, DEFAULT_RADIUS_KM,
};
use places_client::{PlacesQuery, UserLocation};

use crate::source::PlaceSource;

/// Places fetched per feed build
pub const FEED_FETCH_LIMIT: usize = 100;

/// Places shown per carousel
pub const CAROUSEL_LEN: usize = 9;

/// Category carousels, each restricted to the user's state, in display order.
pub const CATEGORY_CAROUSELS: [&str; 5] = ["Cafe", "Nature", "Adventure", "Entertainment", "Restaurant"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousel {
    pub title: String,
    pub places: Vec<Place>,
}

impl Carousel {
    fn new(title: impl Into<String>, mut places: Vec<Place>) -> Self {
        places.truncate(CAROUSEL_LEN);
        Self {
            title: title.into(),
            places,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Every carousel on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousels {
    pub near_me: Carousel,
    pub city: Carousel,
    pub state: Carousel,
    pub country: Carousel,
    /// One per entry of [`CATEGORY_CAROUSELS`], same order
    pub categories: Vec<Carousel>,
    /// The first fetched places, shown only when nothing about the
    /// location is known
    pub featured: Carousel,
    /// How many places the carousels were derived from
    pub fetched: usize,
}

impl Carousels {
    /// Derive all carousels from one fetched list.
    pub fn derive(places: &[Place], location: &UserLocation) -> Self {
        let city = location.city.as_deref();
        let state = location.state.as_deref();
        let country = location.country.as_deref();

        let has_position = location.latitude.is_finite() && location.longitude.is_finite();
        let location_unknown = !has_position && city.is_none() && state.is_none() && country.is_none();
        let featured = if location_unknown {
            places.iter().take(CAROUSEL_LEN).cloned().collect()
        } else {
            Vec::new()
        };
        let near_me = if has_position {
            filter_near_me(places, location.latitude, location.longitude, DEFAULT_RADIUS_KM)
        } else {
            Vec::new()
        };

        let categories = CATEGORY_CAROUSELS
            .iter()
            .map(|category| {
                let matched = state
                    .map(|s| filter_by_category_and_state(places, category, s))
                    .unwrap_or_default();
                Carousel::new(format!("{} in {}", plural(category), state.unwrap_or("your state")), matched)
            })
            .collect();

        Self {
            near_me: Carousel::new("Near you", near_me),
            city: Carousel::new(
                format!("In {}", city.unwrap_or("your city")),
                city.map(|c| filter_by_city(places, c)).unwrap_or_default(),
            ),
            state: Carousel::new(
                format!("Around {}", state.unwrap_or("your state")),
                state.map(|s| filter_by_state(places, s)).unwrap_or_default(),
            ),
            country: Carousel::new(
                format!("Across {}", country.unwrap_or("your country")),
                country.map(|c| filter_by_country(places, c)).unwrap_or_default(),
            ),
            categories,
            featured: Carousel::new("Featured places", featured),
            fetched: places.len(),
        }
    }

    /// All carousels in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Carousel> {
        [&self.featured, &self.near_me, &self.city, &self.state, &self.country]
            .into_iter()
            .chain(self.categories.iter())
    }
}

fn plural(category: &str) -> String {
    match category {
        "Nature" | "Adventure" | "Entertainment" => category.to_string(),
        _ => format!("{category}s"),
    }
}

/// Landing-page feed over any [`PlaceSource`].
#[derive(Debug, Clone)]
pub struct HomeFeed<S> {
    source: S,
}

impl<S: PlaceSource> HomeFeed<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and derive all carousels for `location`.
    pub async fn build(&self, location: &UserLocation) -> Result<Carousels> {
        let start_time = Instant::now();

        let mut query = PlacesQuery::new().limit(FEED_FETCH_LIMIT);
        if let Some(country) = &location.country {
            query = query.country(country.clone());
        }
        info!("Fetching feed places from {}", self.source.describe());
        let places = self
            .source
            .fetch_places(&query)
            .await
            .context("Failed to fetch places for the home feed")?;
        info!("Fetched {} places", places.len());

        // Derivation is CPU work; keep it off the async workers
        let location_owned = location.clone();
        let carousels = tokio::task::spawn_blocking(move || Carousels::derive(&places, &location_owned))
            .await
            .context("Carousel task panicked")?;

        for carousel in carousels.iter() {
            debug!("Carousel {:?}: {} places", carousel.title, carousel.places.len());
        }
        info!(
            "Built {} non-empty carousels in {:.2?}",
            carousels.iter().filter(|c| !c.is_empty()).count(),
            start_time.elapsed()
        );
        Ok(carousels)
    }
}
