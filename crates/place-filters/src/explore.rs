//! Explore: composite filtering driven by an immutable criteria value.
//!
//! The UI dispatches [`ExploreAction`]s; [`ExploreCriteria::reduce`] turns
//! the current criteria plus an action into the next criteria, and
//! [`apply_filters`] is the single pure function from criteria to results.
//! Unset fields mean "no filter requested" here, unlike the direct filter
//! functions, which fail closed on empty input.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    CategoryFilter, CityFilter, MinimumRatingFilter, NearMeFilter, PriceRange, PriceRangeFilter,
    StateFilter, SubCategoryFilter,
};
use crate::matching::normalize;
use crate::ranking::{sort_places, SortOrder};
use place_data::{lookup_category, subcategories_for, Coordinates, Place, CATEGORY_TABLE};

/// Label that clears the category selection when toggled.
pub const ALL_CATEGORIES: &str = "All";

/// Origin and radius for the near-me stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearMeCriteria {
    pub origin: Coordinates,
    pub radius_km: f64,
}

impl NearMeCriteria {
    pub fn new(lat: f64, lng: f64, radius_km: f64) -> Self {
        Self {
            origin: Coordinates::new(lat, lng),
            radius_km,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExploreCriteria {
    /// Selected categories, OR-ed together. Kept in category-table order
    /// (unknown labels last, alphabetically) so a selection has one
    /// representation regardless of click order.
    pub categories: Vec<String>,
    pub sub_category: Option<String>,
    pub price_range: PriceRange,
    pub min_rating: Option<f64>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub near: Option<NearMeCriteria>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExploreAction {
    /// Add or remove a category; [`ALL_CATEGORIES`] clears the selection
    ToggleCategory(String),
    SetSubCategory(Option<String>),
    SetPriceRange(PriceRange),
    SetMinRating(Option<f64>),
    SetState(Option<String>),
    SetCity(Option<String>),
    SetNearMe(Option<NearMeCriteria>),
    SetSort(SortOrder),
    Reset,
}

/// Blank strings are the same as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn table_position(category: &str) -> usize {
    lookup_category(category)
        .and_then(|entry| CATEGORY_TABLE.iter().position(|e| e.name == entry.name))
        .unwrap_or(CATEGORY_TABLE.len())
}

impl ExploreCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next criteria after `action`.
    pub fn reduce(self, action: ExploreAction) -> Self {
        match action {
            ExploreAction::ToggleCategory(label) => self.toggle_category(&label),
            ExploreAction::SetSubCategory(sub_category) => Self {
                sub_category: non_blank(sub_category),
                ..self
            },
            ExploreAction::SetPriceRange(price_range) => Self { price_range, ..self },
            ExploreAction::SetMinRating(min_rating) => Self { min_rating, ..self },
            ExploreAction::SetState(state) => Self {
                state: non_blank(state),
                ..self
            },
            ExploreAction::SetCity(city) => Self {
                city: non_blank(city),
                ..self
            },
            ExploreAction::SetNearMe(near) => Self { near, ..self },
            ExploreAction::SetSort(sort) => Self { sort, ..self },
            ExploreAction::Reset => Self::default(),
        }
    }

    fn toggle_category(mut self, label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return self;
        }

        if normalize(label) == normalize(ALL_CATEGORIES) {
            self.categories.clear();
        } else if let Some(pos) = self
            .categories
            .iter()
            .position(|c| normalize(c) == normalize(label))
        {
            self.categories.remove(pos);
        } else {
            self.categories.push(label.to_string());
            self.categories
                .sort_by_cached_key(|c| (table_position(c), normalize(c)));
        }

        // a subcategory only makes sense while a category offering it is selected
        if let Some(sub) = &self.sub_category {
            let offered = available_subcategories(&self)
                .iter()
                .any(|s| normalize(s) == normalize(sub));
            if !offered {
                self.sub_category = None;
            }
        }
        self
    }

    /// Number of active filter stages (sort order not counted).
    pub fn active_filters(&self) -> usize {
        [
            !self.categories.is_empty(),
            self.sub_category.is_some(),
            !self.price_range.is_unbounded(),
            self.min_rating.is_some(),
            self.state.is_some(),
            self.city.is_some(),
            self.near.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Pipeline for the active criteria, in the fixed order
    /// category, subcategory, price, rating, state, city, near-me.
    pub fn pipeline(&self) -> FilterPipeline {
        let categories = (!self.categories.is_empty()).then(|| CategoryFilter::new(&self.categories));
        let price = (!self.price_range.is_unbounded()).then(|| PriceRangeFilter::new(self.price_range));

        FilterPipeline::new()
            .add_optional(categories)
            .add_optional(self.sub_category.as_ref().map(SubCategoryFilter::new))
            .add_optional(price)
            .add_optional(self.min_rating.map(MinimumRatingFilter::new))
            .add_optional(self.state.as_ref().map(StateFilter::new))
            .add_optional(self.city.as_ref().map(CityFilter::new))
            .add_optional(
                self.near
                    .map(|n| NearMeFilter::new(n.origin.lat, n.origin.lng, n.radius_km)),
            )
    }
}

/// Subcategories offered by the selected categories, in table order,
/// de-duplicated.
pub fn available_subcategories(criteria: &ExploreCriteria) -> Vec<&'static str> {
    let mut offered: Vec<&'static str> = Vec::new();
    for category in &criteria.categories {
        for sub in subcategories_for(category) {
            if !offered.contains(sub) {
                offered.push(*sub);
            }
        }
    }
    offered
}

/// Apply every active criterion, then the sort order.
pub fn apply_filters(places: Vec<Place>, criteria: &ExploreCriteria) -> Vec<Place> {
    let filtered = criteria.pipeline().apply(places);
    sort_places(filtered, criteria.sort)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(criteria: ExploreCriteria, label: &str) -> ExploreCriteria {
        criteria.reduce(ExploreAction::ToggleCategory(label.to_string()))
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let criteria = toggle(ExploreCriteria::new(), "Cafe");
        assert_eq!(criteria.categories, vec!["Cafe"]);
        let criteria = toggle(criteria, "cafe");
        assert!(criteria.categories.is_empty());
    }

    #[test]
    fn test_toggle_keeps_table_order() {
        let criteria = toggle(toggle(toggle(ExploreCriteria::new(), "Zoo"), "Nature"), "Cafe");
        assert_eq!(criteria.categories, vec!["Cafe", "Nature", "Zoo"]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let start = toggle(toggle(ExploreCriteria::new(), "Restaurant"), "Museum")
            .reduce(ExploreAction::SetSubCategory(Some("Fast Food".into())))
            .reduce(ExploreAction::SetMinRating(Some(4.0)));

        let back = toggle(toggle(start.clone(), "Cafe"), "Cafe");
        assert_eq!(back, start);
        let back = toggle(toggle(start.clone(), "Museum"), "Museum");
        assert_eq!(back, start);
    }

    #[test]
    fn test_all_clears_selection_and_subcategory() {
        let criteria = toggle(toggle(ExploreCriteria::new(), "Cafe"), "Nature")
            .reduce(ExploreAction::SetSubCategory(Some("Garden".into())));
        assert_eq!(criteria.sub_category.as_deref(), Some("Garden"));

        let criteria = toggle(criteria, "All");
        assert!(criteria.categories.is_empty());
        assert!(criteria.sub_category.is_none());
    }

    #[test]
    fn test_deselecting_offering_category_clears_subcategory() {
        let criteria = toggle(toggle(ExploreCriteria::new(), "Cafe"), "Nature")
            .reduce(ExploreAction::SetSubCategory(Some("Garden".into())));
        let criteria = toggle(criteria, "Nature");
        assert_eq!(criteria.categories, vec!["Cafe"]);
        assert!(criteria.sub_category.is_none());
    }

    #[test]
    fn test_blank_setters_unset() {
        let criteria = ExploreCriteria::new()
            .reduce(ExploreAction::SetState(Some("  ".into())))
            .reduce(ExploreAction::SetCity(Some(" Austin ".into())));
        assert!(criteria.state.is_none());
        assert_eq!(criteria.city.as_deref(), Some("Austin"));
        assert_eq!(criteria.active_filters(), 1);
    }

    #[test]
    fn test_reset() {
        let criteria = toggle(ExploreCriteria::new(), "Cafe")
            .reduce(ExploreAction::SetSort(SortOrder::Rating))
            .reduce(ExploreAction::Reset);
        assert_eq!(criteria, ExploreCriteria::default());
    }

    #[test]
    fn test_available_subcategories() {
        let criteria = toggle(toggle(ExploreCriteria::new(), "Nature"), "coffee");
        let offered = available_subcategories(&criteria);
        assert_eq!(offered[0], "Coffee Shop");
        assert!(offered.contains(&"Beach"));
        assert!(available_subcategories(&ExploreCriteria::new()).is_empty());
    }

    #[test]
    fn test_pipeline_order() {
        let criteria = toggle(ExploreCriteria::new(), "Cafe")
            .reduce(ExploreAction::SetNearMe(Some(NearMeCriteria::new(0.0, 0.0, 5.0))))
            .reduce(ExploreAction::SetCity(Some("Austin".into())))
            .reduce(ExploreAction::SetMinRating(Some(3.0)))
            .reduce(ExploreAction::SetPriceRange(PriceRange::new(None, Some(30.0))));

        assert_eq!(
            criteria.pipeline().stage_names(),
            vec![
                "CategoryFilter",
                "PriceRangeFilter",
                "MinimumRatingFilter",
                "CityFilter",
                "NearMeFilter"
            ]
        );
        assert!(ExploreCriteria::new().pipeline().is_empty());
    }

    #[test]
    fn test_default_criteria_is_identity() {
        let mut unpriced = Place::new("2", "b", "");
        unpriced.rating = 1.0;
        let places = vec![Place::new("1", "a", "Cafe"), unpriced, Place::new("3", "c", "Park")];
        assert_eq!(apply_filters(places.clone(), &ExploreCriteria::new()), places);
    }
}
