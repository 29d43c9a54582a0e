//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to place lists.

use place_data::Place;

/// Core trait for filtering places.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across tasks
/// - Filters take ownership of the Vec<Place> and return a filtered Vec
/// - Filtering is total: a filter never fails, it only keeps fewer places
/// - Each filter carries its own parameters; there is no shared context
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of places, preserving their relative order
    /// unless the filter is documented to sort.
    fn apply(&self, places: Vec<Place>) -> Vec<Place>;
}
