//! Great-circle distance.
//!
//! The Haversine formula gives the distance between two points on a sphere
//! from their latitudes and longitudes. Earth is treated as a sphere of
//! radius 6371 km, which is plenty for "is this within 50 km" questions.

use place_data::Coordinates;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points given in degrees.
///
/// No range validation: out-of-range input yields a defined but
/// meaningless number. NaN in, NaN out.
///
/// # Example
/// ```
/// use place_filters::distance;
///
/// let berlin_to_paris = distance(52.5200, 13.4050, 48.8566, 2.3522);
/// assert!((berlin_to_paris - 878.0).abs() < 5.0);
/// ```
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// [`distance`] between two coordinate pairs.
#[inline]
pub fn distance_between(from: &Coordinates, to: &Coordinates) -> f64 {
    distance(from.lat, from.lng, to.lat, to.lng)
}

/// Round to one decimal place, half away from zero (half-up for the
/// non-negative values distances produce).
#[inline]
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BERLIN: (f64, f64) = (52.5200, 13.4050);
    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    const TOKYO: (f64, f64) = (35.6762, 139.6503);

    #[test]
    fn test_berlin_to_paris() {
        let d = distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1);
        assert!((d - 878.0).abs() < 5.0, "Berlin-Paris: {}", d);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let d = distance(NEW_YORK.0, NEW_YORK.1, TOKYO.0, TOKYO.1);
        assert!((d - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", d);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 2πR / 360
        let d = distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "{}", d);
    }

    #[test]
    fn test_antipodes() {
        let d = distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(0.04), 0.0);
        assert_eq!(round_to_tenth(0.05), 0.1);
        assert_eq!(round_to_tenth(1.25), 1.3);
        assert_eq!(round_to_tenth(12.345), 12.3);
    }

    #[test]
    fn test_distance_between_matches_scalar_form() {
        let a = Coordinates::new(BERLIN.0, BERLIN.1);
        let b = Coordinates::new(PARIS.0, PARIS.1);
        assert_eq!(distance_between(&a, &b), distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1));
    }

    proptest! {
        #[test]
        fn same_point_is_zero(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(distance(lat, lon, lat, lon).abs() < 1e-9);
        }

        #[test]
        fn symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let there = distance(lat1, lon1, lat2, lon2);
            let back = distance(lat2, lon2, lat1, lon1);
            prop_assert!((there - back).abs() < 1e-6);
        }

        #[test]
        fn bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let d = distance(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
