//! Average-price band.

use crate::traits::Filter;
use place_data::Place;

/// Inclusive price band; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// No bound set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Keeps places whose `avg_price` falls in the range.
///
/// Places without a price always pass: an unknown price is not evidence
/// that the place is out of budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRangeFilter {
    range: PriceRange,
}

impl PriceRangeFilter {
    pub fn new(range: PriceRange) -> Self {
        Self { range }
    }
}

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        places
            .into_iter()
            .filter(|p| p.avg_price.is_none_or(|price| self.range.contains(price)))
            .collect()
    }
}
