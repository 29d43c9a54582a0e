//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use place_data::Place;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CategoryFilter::new(["Cafe"]))
///     .add_filter(MinimumRatingFilter::new(4.0))
///     .add_filter(NearMeFilter::new(lat, lon, 10.0));
///
/// let filtered = pipeline.apply(places);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter only when `filter` is `Some`.
    ///
    /// Used when assembling a pipeline from optional criteria.
    pub fn add_optional<F: Filter + 'static>(self, filter: Option<F>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Stage names in application order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence.
    ///
    /// ## Algorithm
    /// 1. Start with the input places
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        let mut current = places;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{MinimumRatingFilter, StateFilter};

    fn rated(id: &str, rating: f64, state: &str) -> Place {
        let mut place = Place::new(id, format!("Place {}", id), "Cafe");
        place.rating = rating;
        place.state = Some(state.to_string());
        place
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let places = vec![rated("1", 4.0, "Texas"), rated("2", 3.0, "Ohio")];

        let filtered = pipeline.apply(places.clone());
        assert_eq!(filtered, places);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(MinimumRatingFilter::new(3.5));

        let filtered = pipeline.apply(vec![rated("1", 4.0, "Texas"), rated("2", 3.0, "Ohio")]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = FilterPipeline::new()
            .add_filter(StateFilter::new("Texas"))
            .add_optional(None::<MinimumRatingFilter>)
            .add_optional(Some(MinimumRatingFilter::new(4.5)));

        assert_eq!(pipeline.stage_names(), vec!["StateFilter", "MinimumRatingFilter"]);

        let filtered = pipeline.apply(vec![
            rated("1", 4.8, "Texas"),
            rated("2", 4.0, "Texas"),
            rated("3", 5.0, "Ohio"),
        ]);
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }
}
