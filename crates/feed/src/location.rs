//! User location: device providers, manual entry and address geocoding.
//!
//! Failures are reported as they happen. No default coordinate is ever
//! substituted for a missing one.

use crate::config::{GeocoderConfig, LocationOptions};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use spoon_geo::Coordinate;
use thiserror::Error;
use tracing::{debug, instrument};

/// Why the device could not report a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user declined location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// The device has no fix
    #[error("Location information unavailable")]
    PositionUnavailable,

    /// No fix within the configured timeout
    #[error("Location request timed out")]
    Timeout,
}

/// Address lookup failure.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The service found nothing for the query
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Transport failure or non-success status
    #[error("Geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with something unusable
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// A source of the device's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Requests one position fix.
    async fn current_coordinate(
        &self,
        options: &LocationOptions,
    ) -> std::result::Result<Coordinate, LocationError>;
}

/// Provider that always answers the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLocation(std::result::Result<Coordinate, LocationError>);

impl StaticLocation {
    /// Always reports `coordinate`.
    pub fn at(coordinate: Coordinate) -> Self {
        Self(Ok(coordinate))
    }

    /// Always fails with `error`.
    pub fn failing(error: LocationError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl GeolocationProvider for StaticLocation {
    async fn current_coordinate(
        &self,
        _options: &LocationOptions,
    ) -> std::result::Result<Coordinate, LocationError> {
        self.0
    }
}

/// Validates a manually entered coordinate.
pub fn manual_location(latitude: f64, longitude: f64) -> Result<Coordinate> {
    let coordinate = Coordinate::new(latitude, longitude);
    coordinate.validate()?;
    Ok(coordinate)
}

/// Resolves free text ("Atlanta, GA", "30303") to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `query`.
    async fn geocode(&self, query: &str) -> std::result::Result<Coordinate, GeocodeError>;
}

/// One entry of a Nominatim search response.
///
/// The service encodes coordinates as decimal strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NominatimPlace {
    /// Latitude as text
    pub lat: String,
    /// Longitude as text
    pub lon: String,
    /// Human-readable match
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NominatimPlace {
    /// Parses the textual coordinate.
    pub fn coordinate(&self) -> std::result::Result<Coordinate, GeocodeError> {
        let parse = |field: &str, value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| GeocodeError::InvalidResponse(format!("{field} is not a number: {value:?}")))
        };
        let coordinate = Coordinate::new(parse("lat", &self.lat)?, parse("lon", &self.lon)?);
        coordinate
            .validate()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        Ok(coordinate)
    }
}

/// Takes the first place of a search response; an empty list is `NotFound`.
pub fn parse_nominatim_places(
    query: &str,
    places: &[NominatimPlace],
) -> std::result::Result<Coordinate, GeocodeError> {
    places
        .first()
        .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?
        .coordinate()
}

/// Geocoder backed by a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    inner: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Builds a client with the configured user agent and timeout.
    pub fn new(config: &GeocoderConfig) -> std::result::Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| GeocodeError::InvalidResponse(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> std::result::Result<Coordinate, GeocodeError> {
        let places: Vec<NominatimPlace> = self
            .inner
            .get(self.search_url())
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(matches = places.len(), "Geocoding response");
        parse_nominatim_places(query, &places)
    }
}
