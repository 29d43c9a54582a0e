//! # Place Data Crate
//!
//! This crate holds the place record model and everything needed to get
//! places into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Place, Coordinates, PlaceCategory, PlaceIndex)
//! - **catalog**: Static category and country alias tables
//! - **parser**: Decode the places API wire format into `Place`
//! - **index**: Load snapshot files into a `PlaceIndex`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use place_data::PlaceIndex;
//! use std::path::Path;
//!
//! let index = PlaceIndex::load(Path::new("data/places.json"))?;
//! let louvre = index.get_place("louvre").unwrap();
//! println!("{} is in {}", louvre.name, louvre.city);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod catalog;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    PlaceId,
    // Core types
    Place,
    Coordinates,
    Hours,
    PlaceIndex,
    // Enums
    PlaceCategory,
};
pub use catalog::{
    country_aliases, lookup_category, normalize_country, subcategories_for, CategoryEntry,
    CATEGORY_TABLE, TICKETS_TO_EVENT,
};
pub use parser::{parse_places_file, parse_places_json, ApiEnvelope, ApiPlace};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_index_creation() {
        let index = PlaceIndex::new();
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_place() {
        let mut index = PlaceIndex::new();

        let mut place = Place::new("1", "Blue Bottle", "Cafe");
        place.city = "Oakland".to_string();
        index.insert_place(place);

        let retrieved = index.get_place("1").unwrap();
        assert_eq!(retrieved.name, "Blue Bottle");
        assert_eq!(retrieved.city, "Oakland");
    }

    #[test]
    fn test_insert_replaces_same_id_in_place() {
        let mut index = PlaceIndex::new();
        index.insert_place(Place::new("1", "First", "Cafe"));
        index.insert_place(Place::new("2", "Second", "Park"));
        index.insert_place(Place::new("1", "First, renamed", "Cafe"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.places()[0].name, "First, renamed");
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let index: PlaceIndex = vec![
            Place::new("1", "a", "Park"),
            Place::new("2", "b", "Cafe"),
            Place::new("3", "c", "Park"),
        ]
        .into_iter()
        .collect();
        assert_eq!(index.categories(), vec!["Cafe".to_string(), "Park".to_string()]);
    }

    #[test]
    fn test_position_requires_finite_coordinates() {
        let mut place = Place::new("1", "Nowhere", "Other");
        assert!(place.position().is_none());

        place.coordinates = Some(Coordinates::new(f64::NAN, 2.0));
        assert!(place.position().is_none());

        place.coordinates = Some(Coordinates::new(0.0, 0.0));
        assert!(place.position().is_some());
    }

    #[test]
    fn test_category_kind() {
        assert_eq!(Place::new("1", "x", " café ").category_kind(), PlaceCategory::Cafe);
        assert_eq!(Place::new("2", "x", "Tickets to Event").category_kind(), PlaceCategory::Other);
    }

    #[test]
    fn test_empty_queries() {
        let index = PlaceIndex::new();
        assert!(index.get_place("999").is_none());
        assert!(index.categories().is_empty());
    }
}
