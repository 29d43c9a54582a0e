//! Category matching with synonym expansion.
//!
//! A query is expanded through the category table into every spelling that
//! should count as the same category, then compared loosely against each
//! place's category label, subcategory and tags.

use crate::filters::location::filter_by_state;
use crate::matching::{normalize, overlaps};
use crate::traits::Filter;
use place_data::{lookup_category, CategoryEntry, Place, CATEGORY_TABLE, TICKETS_TO_EVENT};
use std::collections::HashSet;

/// A category query expanded into the strings it should match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryVariants {
    /// Canonical table name, when the query resolved to an entry
    pub canonical: Option<&'static str>,
    /// Lowercase names and synonyms, de-duplicated; compared loosely
    pub variants: Vec<String>,
    /// Lowercase subcategories, matched exactly against `sub_category`
    pub subcategories: Vec<String>,
}

impl CategoryVariants {
    fn push_entry(&mut self, entry: &CategoryEntry) {
        self.push_variant(entry.name.to_lowercase());
        for synonym in entry.synonyms {
            self.push_variant(synonym.to_lowercase());
        }
        for sub in entry.subcategories {
            let sub = sub.to_lowercase();
            if !self.subcategories.contains(&sub) {
                self.subcategories.push(sub);
            }
        }
    }

    /// The ticketed-event entry also lends its subcategories as loose
    /// variants, so "Pottery Workshop" counts as an event.
    fn push_tickets(&mut self, entry: &CategoryEntry) {
        self.push_entry(entry);
        for sub in entry.subcategories {
            self.push_variant(sub.to_lowercase());
        }
    }

    fn push_variant(&mut self, variant: String) {
        if !self.variants.contains(&variant) {
            self.variants.push(variant);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Does `place` belong to this category?
    pub fn matches(&self, place: &Place) -> bool {
        let category = normalize(&place.category);
        if self.variants.iter().any(|v| overlaps(&category, v)) {
            return true;
        }

        if let Some(sub) = place.sub_category.as_deref() {
            let sub = normalize(sub);
            if !sub.is_empty() && self.subcategories.contains(&sub) {
                return true;
            }
        }

        place.tags.iter().any(|tag| {
            let tag = normalize(tag);
            self.variants.iter().any(|v| overlaps(&tag, v))
        })
    }
}

/// "event", "events" and anything starting with "ticket" also pull in
/// the ticketed-event entry.
fn widens_to_tickets(query: &str) -> bool {
    query == "event" || query == "events" || query.starts_with("ticket")
}

/// Expand a category query through the category table.
///
/// Unknown queries match only their own lowercased spelling. An empty query
/// yields no variants.
pub fn resolve_category(query: &str) -> CategoryVariants {
    let query = normalize(query);
    let mut resolved = CategoryVariants::default();
    if query.is_empty() {
        return resolved;
    }

    match lookup_category(&query) {
        Some(entry) => {
            resolved.canonical = Some(entry.name);
            resolved.push_entry(entry);
        }
        None => resolved.push_variant(query.clone()),
    }

    if widens_to_tickets(&query) {
        if let Some(tickets) = CATEGORY_TABLE.iter().find(|e| e.name == TICKETS_TO_EVENT) {
            resolved.push_tickets(tickets);
        }
    }
    resolved
}

/// Places matching `query` by category, subcategory or tag.
pub fn filter_by_category(places: &[Place], query: &str) -> Vec<Place> {
    let resolved = resolve_category(query);
    if resolved.is_empty() {
        return Vec::new();
    }
    places.iter().filter(|p| resolved.matches(p)).cloned().collect()
}

/// [`filter_by_category`] followed by [`filter_by_state`]. Either argument
/// empty gives an empty result.
pub fn filter_by_category_and_state(places: &[Place], category: &str, state: &str) -> Vec<Place> {
    filter_by_state(&filter_by_category(places, category), state)
}

/// Multi-category OR.
///
/// Each selected category is matched in turn; the results are concatenated
/// and de-duplicated by id, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    categories: Vec<CategoryVariants>,
}

impl CategoryFilter {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|c| resolve_category(c.as_ref()))
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }
}

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        let mut slots: Vec<Option<Place>> = places.into_iter().map(Some).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut picked = Vec::new();

        for category in &self.categories {
            for slot in slots.iter_mut() {
                let hit = slot
                    .as_ref()
                    .is_some_and(|p| !seen.contains(&p.id) && category.matches(p));
                if let Some(place) = slot.take_if(|_| hit) {
                    seen.insert(place.id.clone());
                    picked.push(place);
                }
            }
        }
        picked
    }
}

/// Keeps places whose subcategory equals the selected one (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryFilter {
    sub_category: String,
}

impl SubCategoryFilter {
    pub fn new(sub_category: impl Into<String>) -> Self {
        Self {
            sub_category: normalize(&sub_category.into()),
        }
    }
}

impl Filter for SubCategoryFilter {
    fn name(&self) -> &str {
        "SubCategoryFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        if self.sub_category.is_empty() {
            return Vec::new();
        }
        places
            .into_iter()
            .filter(|p| {
                p.sub_category
                    .as_deref()
                    .is_some_and(|s| normalize(s) == self.sub_category)
            })
            .collect()
    }
}
