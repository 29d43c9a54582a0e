//! Where feed places come from.

use anyhow::{Context, Result};
use place_data::{Place, PlaceIndex};
use place_filters::matching::equals_loose;
use place_filters::{filter_by_country, sort_places, SortOrder};
use places_client::{PlacesClient, PlacesQuery};
use std::future::Future;
use std::sync::Arc;

/// Anything that can answer a [`PlacesQuery`].
pub trait PlaceSource: Send + Sync {
    /// Short label for logs
    fn describe(&self) -> String;

    fn fetch_places(&self, query: &PlacesQuery) -> impl Future<Output = Result<Vec<Place>>> + Send;
}

impl PlaceSource for PlacesClient {
    fn describe(&self) -> String {
        format!("places API at {}", self.base_url())
    }

    async fn fetch_places(&self, query: &PlacesQuery) -> Result<Vec<Place>> {
        let page = self
            .get_places(query)
            .await
            .with_context(|| format!("Fetching places from {}", self.base_url()))?;
        Ok(page.places)
    }
}

/// An in-memory snapshot answers queries the way the API does: exact
/// (case-insensitive) category and city, alias-aware country, highest
/// rated first, then offset and limit.
impl PlaceSource for PlaceIndex {
    fn describe(&self) -> String {
        format!("snapshot of {} places", self.len())
    }

    async fn fetch_places(&self, query: &PlacesQuery) -> Result<Vec<Place>> {
        Ok(query_snapshot(self.places(), query))
    }
}

impl<S: PlaceSource> PlaceSource for Arc<S> {
    fn describe(&self) -> String {
        self.as_ref().describe()
    }

    fn fetch_places(&self, query: &PlacesQuery) -> impl Future<Output = Result<Vec<Place>>> + Send {
        self.as_ref().fetch_places(query)
    }
}

fn query_snapshot(places: &[Place], query: &PlacesQuery) -> Vec<Place> {
    let mut selected: Vec<Place> = match query.country.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(country) => filter_by_country(places, country),
        None => places.to_vec(),
    };
    if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
        selected.retain(|p| equals_loose(&p.category, category));
    }
    if let Some(city) = query.city.as_deref().filter(|c| !c.trim().is_empty()) {
        selected.retain(|p| equals_loose(&p.city, city));
    }

    let ranked = sort_places(selected, SortOrder::Rating);
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.filter(|n| *n > 0).unwrap_or(usize::MAX);
    ranked.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PlaceIndex {
        let specs = [
            ("1", "Cafe", "Austin", "USA", 4.1),
            ("2", "Park", "Austin", "United States", 4.8),
            ("3", "cafe", "Dallas", "USA", 4.5),
            ("4", "Cafe", "Paris", "France", 5.0),
        ];
        specs
            .into_iter()
            .map(|(id, category, city, country, rating)| {
                let mut place = Place::new(id, id, category);
                place.city = city.to_string();
                place.country = country.to_string();
                place.rating = rating;
                place
            })
            .collect()
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_snapshot_query_filters_and_ranks() {
        let index = snapshot();

        let all = index.fetch_places(&PlacesQuery::new()).await.unwrap();
        assert_eq!(ids(&all), vec!["4", "2", "3", "1"]);

        let usa = index.fetch_places(&PlacesQuery::new().country("USA")).await.unwrap();
        assert_eq!(ids(&usa), vec!["2", "3", "1"]);

        let cafes = index
            .fetch_places(&PlacesQuery::new().country("USA").category("Cafe"))
            .await
            .unwrap();
        assert_eq!(ids(&cafes), vec!["3", "1"]);

        let austin = index.fetch_places(&PlacesQuery::new().city("austin")).await.unwrap();
        assert_eq!(ids(&austin), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_snapshot_query_pages() {
        let index = Arc::new(snapshot());
        let page = index
            .fetch_places(&PlacesQuery::new().offset(1).limit(2))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["2", "3"]);
        assert_eq!(index.describe(), "snapshot of 4 places");
    }
}
