//! Geodesy utilities for Southern Spoon event discovery.
//!
//! This crate provides:
//! - Haversine distance in miles, rounded for display
//! - Miles to kilometers conversion
//! - Distance formatting (`"12.3 mi"`, `"19.8 km"`)
//! - Batch distance annotation with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use spoon_geo::{distance_miles, format_distance, Coordinate, DistanceUnit};
//!
//! let san_francisco = Coordinate::new(37.7749, -122.4194);
//! let los_angeles = Coordinate::new(34.0522, -118.2437);
//!
//! let miles = distance_miles(&san_francisco, &los_angeles);
//! assert!(miles > 340.0 && miles < 360.0);
//! assert!(format_distance(miles, DistanceUnit::Km).ends_with(" km"));
//! ```

mod haversine;
mod units;
pub mod batch;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use haversine::{
    distance_miles, haversine_miles, round_to_tenth, try_distance_miles, EARTH_RADIUS_MILES,
};
pub use units::{format_distance, miles_to_km, DistanceUnit, KM_PER_MILE};
pub use batch::{annotate, calculate_distances, DistanceResult, LocationItem};
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic coordinate with latitude and longitude.
///
/// Values outside `[-90, 90]` / `[-180, 180]` are invalid input. They are
/// never clamped; use [`Coordinate::validate`] at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN components are never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the coordinate, returning [`GeoError::InvalidCoordinate`] when out of range.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
