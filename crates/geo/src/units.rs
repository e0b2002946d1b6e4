//! Distance units, conversion and display formatting.

use crate::haversine::round_to_tenth;
use crate::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kilometers per statute mile.
pub const KM_PER_MILE: f64 = 1.60934;

/// Unit used when displaying a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Statute miles, rendered as `mi`
    #[default]
    Miles,
    /// Kilometers, rendered as `km`
    Km,
}

impl DistanceUnit {
    /// Suffix appended after the number.
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Km => "km",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Miles => f.write_str("miles"),
            DistanceUnit::Km => f.write_str("km"),
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miles" | "mile" | "mi" => Ok(DistanceUnit::Miles),
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Km),
            other => Err(GeoError::UnknownUnit(other.to_string())),
        }
    }
}

/// Converts miles to kilometers, rounded to one decimal place.
///
/// # Example
/// ```
/// use spoon_geo::miles_to_km;
///
/// assert_eq!(miles_to_km(10.0), 16.1);
/// ```
#[inline]
pub fn miles_to_km(miles: f64) -> f64 {
    round_to_tenth(miles * KM_PER_MILE)
}

/// Formats a distance given in miles for display.
///
/// The number keeps whatever rounding it already carries (no thousands
/// separators, no forced trailing zero): `12.0` renders as `"12 mi"`.
///
/// # Example
/// ```
/// use spoon_geo::{format_distance, DistanceUnit};
///
/// assert_eq!(format_distance(3.5, DistanceUnit::Miles), "3.5 mi");
/// assert_eq!(format_distance(3.5, DistanceUnit::Km), "5.6 km");
/// ```
pub fn format_distance(miles: f64, unit: DistanceUnit) -> String {
    let value = match unit {
        DistanceUnit::Miles => miles,
        DistanceUnit::Km => miles_to_km(miles),
    };
    format!("{} {}", value, unit.suffix())
}
