//! Benchmarks for place filtering
//!
//! Run with: cargo bench --package place-filters
//!
//! Uses a synthetic catalog spread over a few cities so runs need no data files.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use place_data::{Coordinates, Place};
use place_filters::{
    apply_filters, filter_by_category, filter_by_country, filter_near_me, ExploreAction,
    ExploreCriteria, NearMeCriteria, SortOrder, DEFAULT_RADIUS_KM,
};

const CITIES: [(&str, &str, &str, f64, f64); 4] = [
    ("Paris", "Ile-de-France", "France", 48.8566, 2.3522),
    ("Austin", "Texas", "USA", 30.2672, -97.7431),
    ("Kyoto", "Kyoto", "Japan", 35.0116, 135.7681),
    ("Lisbon", "Lisboa", "Portugal", 38.7223, -9.1393),
];

const CATEGORIES: [&str; 6] = ["Cafe", "Restaurant", "Park", "Museum", "Nightlife", "Tickets to Event"];

fn synthetic_catalog(size: usize) -> Vec<Place> {
    (0..size)
        .map(|i| {
            let (city, state, country, lat, lng) = CITIES[i % CITIES.len()];
            let mut place = Place::new(i.to_string(), format!("Place {}", i), CATEGORIES[i % CATEGORIES.len()]);
            // deterministic scatter of up to ~0.5 degrees around the city center
            let jitter = ((i * 7919) % 1000) as f64 / 1000.0 - 0.5;
            place.coordinates = Some(Coordinates::new(lat + jitter, lng - jitter));
            place.city = city.to_string();
            place.state = Some(state.to_string());
            place.country = country.to_string();
            place.rating = (i % 50) as f64 / 10.0;
            place.review_count = (i * 31 % 5000) as u32;
            place
        })
        .collect()
}

fn bench_near_me(c: &mut Criterion) {
    let places = synthetic_catalog(10_000);

    c.bench_function("filter_near_me_10k", |b| {
        b.iter(|| {
            let near = filter_near_me(black_box(&places), 48.86, 2.35, DEFAULT_RADIUS_KM);
            black_box(near)
        })
    });
}

fn bench_category_and_country(c: &mut Criterion) {
    let places = synthetic_catalog(10_000);

    c.bench_function("filter_by_category_10k", |b| {
        b.iter(|| black_box(filter_by_category(black_box(&places), "events")))
    });

    c.bench_function("filter_by_country_10k", |b| {
        b.iter(|| black_box(filter_by_country(black_box(&places), "United States")))
    });
}

fn bench_explore(c: &mut Criterion) {
    let places = synthetic_catalog(10_000);
    let criteria = ExploreCriteria::new()
        .reduce(ExploreAction::ToggleCategory("Cafe".into()))
        .reduce(ExploreAction::ToggleCategory("Nature".into()))
        .reduce(ExploreAction::SetMinRating(Some(3.0)))
        .reduce(ExploreAction::SetNearMe(Some(NearMeCriteria::new(30.27, -97.74, 25.0))))
        .reduce(ExploreAction::SetSort(SortOrder::Rating));

    c.bench_function("apply_filters_10k", |b| {
        b.iter(|| black_box(apply_filters(places.clone(), black_box(&criteria))))
    });
}

criterion_group!(benches, bench_near_me, bench_category_and_country, bench_explore);
criterion_main!(benches);
