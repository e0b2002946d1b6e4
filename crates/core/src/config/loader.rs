//! Configuration file loading

use crate::error::{Error, ErrorCode, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Base name of the configuration file
pub const CONFIG_FILE_NAME: &str = "southern-spoon.toml";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config<T> {
    /// Parsed schema
    pub schema: T,
    /// File the schema was read from, `None` when defaults are in use
    pub path: Option<PathBuf>,
}

impl<T: DeserializeOwned + Default> Config<T> {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when nothing is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => p.to_path_buf(),
            None => match find_config_file() {
                Some(found) => found,
                None => return Ok(Self::defaults()),
            },
        };

        Ok(Self {
            schema: load_config_file(&config_path)?,
            path: Some(config_path),
        })
    }

    /// Load with defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            schema: T::default(),
            path: None,
        }
    }
}

/// Standard configuration locations, in search order
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(CONFIG_FILE_NAME),
        PathBuf::from(format!(".{}", CONFIG_FILE_NAME)),
    ];

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("southern-spoon").join("config.toml"));
    }

    candidates
}

/// Find configuration file in standard locations
pub fn find_config_file() -> Option<PathBuf> {
    config_candidates().into_iter().find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}
