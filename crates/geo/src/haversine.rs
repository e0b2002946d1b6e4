//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Distances here are in miles
//! and rounded to one decimal place, which is what event cards display.

use crate::{Coordinate, Result};

/// Earth's mean radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Rounds to one decimal place, half-up at the 0.1 granularity.
///
/// Matches `Math.round(x * 10) / 10`: halves round toward positive infinity.
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Calculates the great-circle distance between two coordinates in miles,
/// rounded to one decimal place.
///
/// Both coordinates must be valid (see [`Coordinate::is_valid`]). Out-of-range
/// input trips a debug assertion; use [`try_distance_miles`] when the input
/// has not been validated yet.
///
/// # Example
/// ```
/// use spoon_geo::{distance_miles, Coordinate};
///
/// let los_angeles = Coordinate::new(34.0522, -118.2437);
/// let new_york = Coordinate::new(40.7128, -74.0060);
///
/// let distance = distance_miles(&los_angeles, &new_york);
/// assert!(distance > 2400.0 && distance < 2500.0);
/// ```
#[inline]
pub fn distance_miles(from: &Coordinate, to: &Coordinate) -> f64 {
    debug_assert!(from.is_valid(), "invalid coordinate {from}");
    debug_assert!(to.is_valid(), "invalid coordinate {to}");
    round_to_tenth(haversine_miles(from, to))
}

/// Checked variant of [`distance_miles`].
///
/// Returns [`crate::GeoError::InvalidCoordinate`] instead of computing a
/// distance from out-of-range input.
pub fn try_distance_miles(from: &Coordinate, to: &Coordinate) -> Result<f64> {
    from.validate()?;
    to.validate()?;
    Ok(distance_miles(from, to))
}

/// Unrounded great-circle distance in miles.
///
/// The cosine product is computed before multiplying by the longitude term so
/// swapping `from` and `to` yields the same bits.
#[inline]
pub fn haversine_miles(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, _) = from.to_radians();
    let (lat2, _) = to.to_radians();

    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] near antipodes.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;
    use proptest::prelude::*;

    // Test data: known distances between cities
    const LOS_ANGELES: Coordinate = Coordinate { latitude: 34.0522, longitude: -118.2437 };
    const NEW_YORK: Coordinate = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    const SAN_FRANCISCO: Coordinate = Coordinate { latitude: 37.7749, longitude: -122.4194 };

    #[test]
    fn test_los_angeles_to_new_york() {
        let distance = distance_miles(&LOS_ANGELES, &NEW_YORK);
        // Expected: ~2445 mi
        assert!(distance > 2400.0 && distance < 2500.0, "LA-NYC: {}", distance);
    }

    #[test]
    fn test_san_francisco_to_los_angeles() {
        let distance = distance_miles(&SAN_FRANCISCO, &LOS_ANGELES);
        // Expected: ~347 mi
        assert!(distance > 340.0 && distance < 360.0, "SF-LA: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_miles(&NEW_YORK, &NEW_YORK), 0.0);
    }

    #[test]
    fn test_result_has_one_decimal() {
        let distance = distance_miles(&SAN_FRANCISCO, &LOS_ANGELES);
        let scaled = distance * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let distance = distance_miles(&a, &b);
        assert!(distance.is_finite());
        // Half the circumference: pi * R
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_MILES).abs() < 0.1);

        let north = Coordinate::new(90.0, 0.0);
        let south = Coordinate::new(-90.0, 0.0);
        assert!(distance_miles(&north, &south).is_finite());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(1.04), 1.0);
        assert_eq!(round_to_tenth(2.0), 2.0);
        assert_eq!(round_to_tenth(-0.25), -0.2);
    }

    #[test]
    fn test_try_distance_rejects_invalid() {
        let bad = Coordinate::new(95.0, 0.0);
        assert!(matches!(
            try_distance_miles(&bad, &NEW_YORK),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(try_distance_miles(&NEW_YORK, &LOS_ANGELES).is_ok());
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    proptest! {
        #[test]
        fn prop_distance_non_negative_and_finite(a in coordinate(), b in coordinate()) {
            let distance = distance_miles(&a, &b);
            prop_assert!(distance >= 0.0);
            prop_assert!(distance.is_finite());
        }

        #[test]
        fn prop_distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(distance_miles(&a, &a), 0.0);
        }

        #[test]
        fn prop_distance_is_symmetric(a in coordinate(), b in coordinate()) {
            prop_assert_eq!(
                distance_miles(&a, &b).to_bits(),
                distance_miles(&b, &a).to_bits()
            );
        }

        #[test]
        fn prop_distance_bounded_by_half_circumference(a in coordinate(), b in coordinate()) {
            let half = round_to_tenth(std::f64::consts::PI * EARTH_RADIUS_MILES);
            prop_assert!(distance_miles(&a, &b) <= half);
        }
    }
}
