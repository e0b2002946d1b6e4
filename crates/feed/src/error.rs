//! Error types for the feed crate.

use crate::location::{GeocodeError, LocationError};
use crate::record::MalformedRecord;
use crate::store::StoreError;
use spoon_core::ErrorCode;
use spoon_geo::GeoError;
use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors surfaced by the feed pipeline and the discovery service.
///
/// Malformed store records are not errors here: they are skipped and
/// reported through [`crate::DiscoveryFeed::skipped`].
#[derive(Debug, Error)]
pub enum FeedError {
    /// Caller passed an out-of-range coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// Device location could not be obtained
    #[error(transparent)]
    Location(#[from] LocationError),

    /// Manual address lookup failed
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// A collaborator read or write failed; never retried here
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unknown saved-list sort key
    #[error("Unknown sort key: {0} (expected date, distance or name)")]
    UnknownSortKey(String),

    /// Unknown undefined-distance policy
    #[error("Unknown missing-distance policy: {0} (expected treat_as_zero or last)")]
    UnknownMissingDistance(String),
}

impl FeedError {
    /// Returns the shared error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            FeedError::InvalidCoordinate(GeoError::InvalidCoordinate { .. }) => {
                ErrorCode::InvalidCoordinate
            }
            FeedError::InvalidCoordinate(GeoError::UnknownUnit(_)) => ErrorCode::InvalidInput,
            FeedError::Location(LocationError::PermissionDenied) => {
                ErrorCode::LocationPermissionDenied
            }
            FeedError::Location(LocationError::PositionUnavailable) => {
                ErrorCode::PositionUnavailable
            }
            FeedError::Location(LocationError::Timeout) => ErrorCode::LocationTimeout,
            FeedError::Geocode(GeocodeError::NotFound(_)) => ErrorCode::GeocodeNotFound,
            FeedError::Geocode(_) => ErrorCode::GeocodeFailed,
            FeedError::Store(StoreError::Read(_)) => ErrorCode::StoreReadFailure,
            FeedError::Store(StoreError::Write(_)) => ErrorCode::StoreWriteFailure,
            FeedError::Store(StoreError::NotFound { .. }) => ErrorCode::NotFound,
            FeedError::UnknownSortKey(_) | FeedError::UnknownMissingDistance(_) => {
                ErrorCode::InvalidInput
            }
        }
    }

    /// Recovery hint shown next to the message.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            FeedError::Location(LocationError::PermissionDenied) => {
                Some("Allow location access or enter a city or ZIP code manually")
            }
            FeedError::Location(_) => Some("Try again, or enter a city or ZIP code manually"),
            FeedError::Geocode(GeocodeError::NotFound(_)) => {
                Some("Try a city and state such as \"Atlanta, GA\" or a ZIP code such as \"30303\"")
            }
            FeedError::Store(StoreError::Write(_)) => {
                Some("The write was not retried; repeat the action")
            }
            _ => None,
        }
    }
}

impl From<FeedError> for spoon_core::Error {
    fn from(err: FeedError) -> Self {
        let code = err.code();
        let suggestion = err.suggestion();
        let mut converted = spoon_core::Error::new(code, err.to_string());
        if let Some(suggestion) = suggestion {
            converted = converted.with_suggestion(suggestion);
        }
        converted.with_source(err)
    }
}

impl From<MalformedRecord> for spoon_core::Error {
    fn from(record: MalformedRecord) -> Self {
        spoon_core::Error::malformed_record(&record.event_id, record.reasons.join("; "))
    }
}
