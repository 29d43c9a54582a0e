//! Filter implementations for the place pipeline.
//!
//! Each module provides the direct filter functions (fail-closed on empty
//! queries) and the matching `Filter` stages that a FilterPipeline composes.

pub mod category;
pub mod location;
pub mod minimum_rating;
pub mod near_me;
pub mod price_range;

// Re-export for convenience
pub use category::{
    filter_by_category, filter_by_category_and_state, resolve_category, CategoryFilter,
    CategoryVariants, SubCategoryFilter,
};
pub use location::{
    filter_by_city, filter_by_country, filter_by_state, CityFilter, CountryFilter, StateFilter,
};
pub use minimum_rating::MinimumRatingFilter;
pub use near_me::{filter_near_me, NearMeFilter, DEFAULT_RADIUS_KM};
pub use price_range::{PriceRange, PriceRangeFilter};
