//! Reading the city list produced by the city pipeline.
//!
//! The category pipeline cannot run without it: categories are listed per
//! city, and the only source of city identifiers is a previous `cities` run.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// The subset of a [`crate::CityRecord`] needed to address per-city requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityRef {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Load city identifiers from a JSON array file.
///
/// # Errors
///
/// - [`ConfigError::CitiesFileMissing`] when `path` does not exist; the error
///   message tells the operator to run the city collector first.
/// - [`ConfigError::Validation`] when the document is not a JSON array.
/// - [`ConfigError::CitiesFileParse`] when the JSON is malformed or an entry
///   has no `uuid`.
pub fn load_cities(path: &Path) -> Result<Vec<CityRef>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::CitiesFileMissing {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let parse_err = |source| ConfigError::CitiesFileParse {
        path: path.display().to_string(),
        source,
    };

    let document: serde_json::Value = serde_json::from_str(&content).map_err(parse_err)?;
    if !document.is_array() {
        return Err(ConfigError::Validation(format!(
            "cities file {} must contain a JSON array of cities",
            path.display()
        )));
    }

    serde_json::from_value(document).map_err(parse_err)
}
