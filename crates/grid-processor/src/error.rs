//! Error types for district aggregation.

use districts::DistrictError;
use netcdf_parser::NetCdfError;
use thiserror::Error;

/// Errors that can occur while summarizing a district.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// A required variable is absent from the dataset.
    #[error("variable not found in dataset: {0}")]
    MissingVariable(String),

    /// District lookup failed.
    #[error(transparent)]
    District(#[from] DistrictError),

    /// The dataset could not be read.
    #[error(transparent)]
    Dataset(#[from] NetCdfError),
}

impl GridProcessorError {
    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable(name.into())
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
