//! Radius filter around the user's position.
//!
//! Keeps places within `radius_km` of an origin, annotates each kept copy
//! with its rounded distance, and orders the result nearest first.

use crate::distance::{distance, round_to_tenth};
use crate::traits::Filter;
use place_data::{Coordinates, Place};

/// Radius used by the home feed's "near me" carousel.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Places within `radius_km` (inclusive) of `(user_lat, user_lon)`.
///
/// ## Algorithm
/// 1. Skip places without a finite position
/// 2. Compute the Haversine distance; keep `distance <= radius_km`
/// 3. Attach `distance_km` rounded to one decimal
/// 4. Stable sort ascending by `distance_km`
///
/// The input is borrowed; returned places are annotated copies. Comparison
/// uses the unrounded distance, so a place at 10.04 km is excluded from a
/// 10 km radius even though it displays as 10.0.
pub fn filter_near_me(places: &[Place], user_lat: f64, user_lon: f64, radius_km: f64) -> Vec<Place> {
    let mut nearby: Vec<Place> = places
        .iter()
        .filter_map(|place| {
            let position = place.position()?;
            let km = distance(user_lat, user_lon, position.lat, position.lng);
            (km <= radius_km).then(|| Place {
                distance_km: Some(round_to_tenth(km)),
                ..place.clone()
            })
        })
        .collect();

    // sort_by is stable: equal distances keep input order
    nearby.sort_by(|a, b| {
        let a = a.distance_km.unwrap_or(f64::INFINITY);
        let b = b.distance_km.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    nearby
}

/// [`filter_near_me`] as a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearMeFilter {
    origin: Coordinates,
    radius_km: f64,
}

impl NearMeFilter {
    pub fn new(user_lat: f64, user_lon: f64, radius_km: f64) -> Self {
        Self {
            origin: Coordinates::new(user_lat, user_lon),
            radius_km,
        }
    }

    /// Filter around `origin` with [`DEFAULT_RADIUS_KM`].
    pub fn around(origin: Coordinates) -> Self {
        Self {
            origin,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}

impl Filter for NearMeFilter {
    fn name(&self) -> &str {
        "NearMeFilter"
    }

    fn apply(&self, places: Vec<Place>) -> Vec<Place> {
        filter_near_me(&places, self.origin.lat, self.origin.lng, self.radius_km)
    }
}
