//! CLI command implementations

pub mod config;
pub mod distance;
pub mod feed;
pub mod geocode;
pub mod saved;

use anyhow::Result;
use serde::de::DeserializeOwned;
use spoon_core::{Error, ResultExt};
use std::path::Path;

/// Reads a JSON document from disk.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path),
            _ => Error::from(err),
        })
        .context(format!("Reading {}", path.display()))?;
    let parsed = serde_json::from_str(&text)
        .map_err(Error::from)
        .context(format!("Parsing {}", path.display()))?;
    Ok(parsed)
}
