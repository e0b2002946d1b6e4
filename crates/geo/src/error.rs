//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude} (expected [-90, 90], [-180, 180])")]
    InvalidCoordinate {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Unknown distance unit name
    #[error("Unknown distance unit: {0} (expected \"miles\" or \"km\")")]
    UnknownUnit(String),
}

/// Error code for integration with spoon-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Unknown unit
    UnknownUnit = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate { .. } => GeoErrorCode::InvalidCoordinate,
            GeoError::UnknownUnit(_) => GeoErrorCode::UnknownUnit,
        }
    }
}
