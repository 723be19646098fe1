//! Error type for request handling.
//!
//! Every failure in the resolve → open → summarize chain reaches the client
//! as HTTP 500 with `{"detail": "<Kind>: <message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use districts::DistrictError;
use grid_processor::GridProcessorError;
use netcdf_parser::NetCdfError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    District(#[from] DistrictError),

    #[error(transparent)]
    Dataset(#[from] NetCdfError),

    #[error(transparent)]
    Aggregation(#[from] GridProcessorError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl CalendarError {
    /// Short name of the failure, used as the `detail` prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            CalendarError::District(e) => district_kind(e),
            CalendarError::Dataset(e) => dataset_kind(e),
            CalendarError::Aggregation(e) => match e {
                GridProcessorError::MissingVariable(_) => "MissingVariable",
                GridProcessorError::District(e) => district_kind(e),
                GridProcessorError::Dataset(e) => dataset_kind(e),
            },
            CalendarError::Storage(e) => match e {
                StorageError::NoDataAvailable { .. } => "NoDataAvailable",
                StorageError::Io(_) => "IoError",
            },
            CalendarError::Task(_) => "InternalError",
        }
    }

    /// The `detail` string sent to clients.
    pub fn detail(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

fn district_kind(err: &DistrictError) -> &'static str {
    match err {
        DistrictError::NotFound(_) => "DistrictNotFound",
        DistrictError::Io { .. } => "IoError",
        _ => "ConfigurationError",
    }
}

fn dataset_kind(err: &NetCdfError) -> &'static str {
    match err {
        NetCdfError::IoError(_) => "IoError",
        NetCdfError::Library(_) => "NetCdfError",
        NetCdfError::MissingData(_) | NetCdfError::InvalidFormat(_) => "DataFormatError",
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl IntoResponse for CalendarError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "Calendar request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(self.detail())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kinds() {
        let err: CalendarError = DistrictError::NotFound("Atlantis".to_string()).into();
        assert_eq!(err.kind(), "DistrictNotFound");
        assert_eq!(err.detail(), "DistrictNotFound: District not found: Atlantis");

        let err: CalendarError = StorageError::NoDataAvailable {
            store: PathBuf::from("_store"),
        }
        .into();
        assert_eq!(err.kind(), "NoDataAvailable");

        let err: CalendarError =
            GridProcessorError::District(DistrictError::NotFound("x".to_string())).into();
        assert_eq!(err.kind(), "DistrictNotFound");

        let err: CalendarError =
            NetCdfError::InvalidFormat("Could not find lon/lat coords in dataset".to_string())
                .into();
        assert_eq!(
            err.detail(),
            "DataFormatError: Invalid data format: Could not find lon/lat coords in dataset"
        );
    }

    #[test]
    fn test_response_status() {
        let err = CalendarError::Task("join error".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
