//! Filter to ensure minimum quality threshold.
//!
//! Removes places rated below a threshold, so Explore only lists places
//! that meet the user's bar.

use crate::traits::Filter;
use place_data::Place;

/// Removes places rated below `min_rating`.
///
/// Ratings are compared as stored, so an out-of-range rating (say 7.5)
/// passes any threshold up to its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Minimum rating to keep (typically 3.0 to 4.5)
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        places
            .into_iter()
            .filter(|place| place.rating >= self.min_rating)
            .collect()
    }
}
