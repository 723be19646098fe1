//! Error types for the district registry.

use std::path::PathBuf;

use hiwat_common::CrsParseError;
use thiserror::Error;

/// Errors raised while loading or querying district polygons.
#[derive(Error, Debug)]
pub enum DistrictError {
    /// No property in the source matches a known name field.
    #[error("districts file must have a name column ({candidates})")]
    MissingNameField { candidates: String },

    /// The source declares a CRS that cannot be converted to EPSG:4326.
    #[error(transparent)]
    UnsupportedCrs(#[from] CrsParseError),

    /// No district matches the requested name.
    #[error("District not found: {0}")]
    NotFound(String),

    /// The district file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The district file is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    Parse(String),
}

impl DistrictError {
    /// True for errors caused by the polygon source rather than the query.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingNameField { .. } | Self::UnsupportedCrs(_) | Self::Parse(_)
        )
    }
}

impl From<geojson::Error> for DistrictError {
    fn from(err: geojson::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for district operations.
pub type DistrictResult<T> = std::result::Result<T, DistrictError>;
