//! Configuration schema for discovery, saved lists, location and logging.

use crate::sort::{MissingDistance, SortKey};
use serde::{Deserialize, Serialize};
use spoon_core::config::Config;
use spoon_core::validation::Validator;
use spoon_core::{Error, ErrorCode, Result};
use spoon_geo::DistanceUnit;
use spoon_telemetry::TelemetryConfig;
use std::path::Path;
use std::time::Duration;

/// Root configuration schema. Every section and field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Presentation
    pub display: DisplayConfig,
    /// Saved-list defaults
    pub saved: SavedConfig,
    /// Device location request
    pub location: LocationOptions,
    /// Manual address lookup
    pub geocoder: GeocoderConfig,
    /// Logging
    pub logging: TelemetryConfig,
}

/// Presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Unit distances are shown in
    pub unit: DistanceUnit,
}

/// Saved-list settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedConfig {
    /// Initial sort key
    pub default_sort: SortKey,
    /// Where events without a distance go when sorting by distance
    pub missing_distance: MissingDistance,
}

/// Options for a device location request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationOptions {
    /// Ask for a GPS-grade fix
    pub high_accuracy: bool,
    /// Give up after this many seconds
    pub timeout_secs: u64,
    /// Accept a cached fix up to this old
    pub maximum_age_secs: u64,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_secs: 10,
            maximum_age_secs: 300,
        }
    }
}

impl LocationOptions {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Oldest acceptable cached fix.
    pub fn maximum_age(&self) -> Duration {
        Duration::from_secs(self.maximum_age_secs)
    }
}

/// Geocoding service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Service root, without the `/search` path
    pub base_url: String,
    /// Sent with every request, as the service's usage policy asks
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "southern-spoon/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FeedConfig {
    /// Loads from an explicit path or the standard locations, then validates.
    pub fn load(path: Option<&Path>) -> Result<Config<FeedConfig>> {
        let config = Config::<FeedConfig>::load(path)?;
        config.schema.validate()?;
        Ok(config)
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            Error::new(ErrorCode::ConfigError, format!("Failed to render configuration: {e}"))
        })
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .required("geocoder.base_url", Some(self.geocoder.base_url.as_str()))
            .custom("geocoder.base_url", || {
                let url = &self.geocoder.base_url;
                (!url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")))
                    .then(|| "Must start with http:// or https://".to_string())
            })
            .required("geocoder.user_agent", Some(self.geocoder.user_agent.as_str()))
            .range("geocoder.timeout_secs", self.geocoder.timeout_secs, 1, 300)
            .range("location.timeout_secs", self.location.timeout_secs, 1, 300)
            .required("logging.level", Some(self.logging.log_level.as_str()))
            .validate()
            .to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.display.unit, DistanceUnit::Miles);
        assert_eq!(config.saved.default_sort, SortKey::Date);
        assert_eq!(config.saved.missing_distance, MissingDistance::TreatAsZero);
        assert!(config.location.high_accuracy);
        assert_eq!(config.location.timeout(), Duration::from_secs(10));
        assert_eq!(config.location.maximum_age(), Duration::from_secs(300));
        assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.logging.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
[display]
unit = "km"

[saved]
default_sort = "distance"
missing_distance = "last"

[logging]
level = "debug"
"#,
        );

        let config = FeedConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.path.as_deref(), Some(file.path()));

        let schema = config.schema;
        assert_eq!(schema.display.unit, DistanceUnit::Km);
        assert_eq!(schema.saved.default_sort, SortKey::Distance);
        assert_eq!(schema.saved.missing_distance, MissingDistance::Last);
        assert_eq!(schema.logging.log_level, "debug");
        assert_eq!(schema.location, LocationOptions::default());
        assert_eq!(schema.geocoder, GeocoderConfig::default());
    }

    #[test]
    fn test_unknown_sort_key_is_parse_error() {
        let file = write_config("[saved]\ndefault_sort = \"price\"\n");
        let err = FeedConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let file = write_config(
            "[geocoder]\nbase_url = \"nominatim.local\"\ntimeout_secs = 0\n",
        );
        let err = FeedConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("geocoder.base_url"));
        assert!(err.message.contains("geocoder.timeout_secs"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FeedConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_serializes_to_toml() {
        let text = FeedConfig::default().to_toml().unwrap();
        assert!(text.contains("[geocoder]"));
        assert!(text.contains("default_sort = \"date\""));
    }
}
