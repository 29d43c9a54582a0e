//! Integration tests for the place filters.
//!
//! These tests run the direct filter functions and the Explore flow
//! together over a small realistic catalog.

use place_data::{parse_places_json, Coordinates, Place};
use place_filters::filters::*;
use place_filters::*;

fn place(id: &str, city: &str, country: &str, category: &str, rating: f64, at: (f64, f64)) -> Place {
    let mut place = Place::new(id, format!("Place {}", id), category);
    place.city = city.to_string();
    place.country = country.to_string();
    place.rating = rating;
    place.coordinates = Some(Coordinates::from(at));
    place
}

fn ids(places: &[Place]) -> Vec<&str> {
    places.iter().map(|p| p.id.as_str()).collect()
}

fn create_test_catalog() -> Vec<Place> {
    let mut places = vec![
        place("louvre", "Paris", "France", "Museum", 4.8, (48.8606, 2.3376)),
        place("flore", "Paris", "France", "Cafe", 4.3, (48.8542, 2.3326)),
        place("luxembourg", "Paris", "France", "Park", 4.7, (48.8462, 2.3372)),
        place("bouchon", "Lyon", "France", "Restaurant", 4.6, (45.7640, 4.8357)),
        place("zilker", "Austin", "United States of America", "Park", 4.6, (30.2669, -97.7729)),
        place("houndstooth", "Austin", "USA", "Cafe", 4.4, (30.2700, -97.7500)),
        place("acl", "Austin", "US", "Tickets to Event", 4.9, (30.2650, -97.7680)),
    ];

    for p in places.iter_mut().filter(|p| p.city == "Austin") {
        p.state = Some("Texas".to_string());
    }
    places[1].avg_price = Some(12.0);
    places[3].avg_price = Some(45.0);
    places[3].sub_category = Some("Fine Dining".to_string());
    places[5].review_count = 900;
    places[6].review_count = 12000;
    places
}

#[test]
fn test_paris_lyon_scenario() {
    let places = vec![
        place("1", "Paris", "France", "Cafe", 4.5, (48.85, 2.35)),
        place("2", "Lyon", "France", "Park", 3.0, (45.76, 4.84)),
    ];

    let near = filter_near_me(&places, 48.86, 2.35, 10.0);
    assert_eq!(ids(&near), vec!["1"]);
    let km = near[0].distance_km.unwrap();
    assert!((0.0..=1.1).contains(&km), "{}", km);

    assert_eq!(ids(&filter_by_category(&places, "park")), vec!["2"]);
}

#[test]
fn test_country_aliases_across_catalog() {
    let catalog = create_test_catalog();
    let usa = filter_by_country(&catalog, "USA");
    assert_eq!(ids(&usa), vec!["zilker", "houndstooth", "acl"]);
    assert_eq!(ids(&filter_by_country(&catalog, "United States")), ids(&usa));
    assert_eq!(filter_by_country(&catalog, "france").len(), 4);
}

#[test]
fn test_explore_composite_flow() {
    let catalog = create_test_catalog();

    let criteria = ExploreCriteria::new()
        .reduce(ExploreAction::ToggleCategory("Cafe".into()))
        .reduce(ExploreAction::ToggleCategory("Nature".into()))
        .reduce(ExploreAction::SetMinRating(Some(4.4)))
        .reduce(ExploreAction::SetPriceRange(PriceRange::new(None, Some(20.0))))
        .reduce(ExploreAction::SetSort(SortOrder::Rating));

    let results = apply_filters(catalog.clone(), &criteria);
    // flore is rated below 4.4; parks and houndstooth have no price
    assert_eq!(ids(&results), vec!["luxembourg", "zilker", "houndstooth"]);

    let in_texas = apply_filters(
        catalog.clone(),
        &criteria.clone().reduce(ExploreAction::SetState(Some("texas".into()))),
    );
    assert_eq!(ids(&in_texas), vec!["zilker", "houndstooth"]);

    let cleared = criteria.reduce(ExploreAction::ToggleCategory("All".into()));
    assert!(cleared.categories.is_empty());
    // price and rating still apply: flore is under 4.4, bouchon over budget
    assert_eq!(apply_filters(catalog, &cleared).len(), 5);
}

#[test]
fn test_explore_near_me_then_distance_sort() {
    let catalog = create_test_catalog();
    let criteria = ExploreCriteria::new()
        .reduce(ExploreAction::SetNearMe(Some(NearMeCriteria::new(48.8566, 2.3522, 5.0))))
        .reduce(ExploreAction::SetSort(SortOrder::Distance));

    let results = apply_filters(catalog, &criteria);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|p| p.city == "Paris"));
    for pair in results.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[test]
fn test_subcategory_narrowing() {
    let catalog = create_test_catalog();
    let criteria = ExploreCriteria::new()
        .reduce(ExploreAction::ToggleCategory("Restaurant".into()))
        .reduce(ExploreAction::SetSubCategory(Some("Fine Dining".into())));
    assert!(available_subcategories(&criteria).contains(&"Fine Dining"));
    assert_eq!(ids(&apply_filters(catalog, &criteria)), vec!["bouchon"]);
}

#[test]
fn test_events_reach_ticketed_places() {
    let catalog = create_test_catalog();
    assert_eq!(ids(&filter_by_category(&catalog, "events")), vec!["acl"]);
    assert_eq!(
        ids(&filter_by_category_and_state(&catalog, "Cafe", "Texas")),
        vec!["houndstooth"]
    );
}

#[test]
fn test_featured_and_search() {
    let catalog = create_test_catalog();
    let featured = featured_places(&catalog, 3);
    assert_eq!(ids(&featured), vec!["acl", "louvre", "luxembourg"]);

    let popular = sort_places(catalog.clone(), SortOrder::Popularity);
    assert_eq!(popular[0].id, "acl");

    let found = search_places(&catalog, "austin", None);
    assert_eq!(ids(&found), vec!["acl", "zilker", "houndstooth"]);
}

#[test]
fn test_wire_record_without_longitude_is_not_near() {
    let json = r#"{"success": true, "count": 2, "data": [
        {"id": 1, "name": "Half", "latitude": 48.85},
        {"id": 2, "name": "Whole", "latitude": 48.85, "longitude": 2.35}
    ]}"#;
    let places = parse_places_json(json, "inline").unwrap();
    assert!(places[0].coordinates.is_none());

    let near = filter_near_me(&places, 48.85, 2.35, 50.0);
    assert_eq!(ids(&near), vec!["2"]);
}
