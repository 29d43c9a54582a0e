//! Filtering and ranking for place lists.
//!
//! This crate provides:
//! - Haversine distance and the near-me radius filter
//! - City/state/country and category filters with alias expansion
//! - Filter trait and FilterPipeline for composing filters
//! - Explore criteria, its reducer, and `apply_filters`
//! - Sort orders, featured selection and text search
//!
//! ## Architecture
//! Every operation is a pure function over a borrowed or owned slice of
//! places. Nothing here performs I/O, and nothing fails: an empty query
//! simply yields an empty result.
//!
//! ## Example Usage
//! ```ignore
//! use place_filters::{apply_filters, ExploreAction, ExploreCriteria, SortOrder};
//!
//! let criteria = ExploreCriteria::new()
//!     .reduce(ExploreAction::ToggleCategory("Cafe".into()))
//!     .reduce(ExploreAction::SetMinRating(Some(4.0)))
//!     .reduce(ExploreAction::SetSort(SortOrder::Rating));
//!
//! let results = apply_filters(index.into_places(), &criteria);
//! ```

pub mod distance;
pub mod explore;
pub mod filter_pipeline;
pub mod filters;
pub mod matching;
pub mod ranking;
pub mod traits;

// Re-export main types
pub use distance::{distance, distance_between, round_to_tenth, EARTH_RADIUS_KM};
pub use explore::{
    apply_filters, available_subcategories, ExploreAction, ExploreCriteria, NearMeCriteria,
    ALL_CATEGORIES,
};
pub use filter_pipeline::FilterPipeline;
pub use filters::{
    filter_by_category, filter_by_category_and_state, filter_by_city, filter_by_country,
    filter_by_state, filter_near_me, resolve_category, CategoryVariants, PriceRange,
    DEFAULT_RADIUS_KM,
};
pub use ranking::{
    featured_places, search_places, sort_places, ParseSortOrderError, SortOrder,
    FEATURED_MIN_RATING,
};
pub use traits::Filter;
