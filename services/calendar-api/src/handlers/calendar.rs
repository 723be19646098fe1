//! District calendar handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grid_processor::{summarize, DistrictSummary};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CalendarError, ErrorBody};
use crate::state::AppState;

/// Query parameters for the calendar endpoint.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    /// District name, matched case-insensitively. Required.
    pub district: Option<String>,
}

/// GET /calendar?district=<name>
pub async fn calendar_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CalendarParams>,
) -> Response {
    let Some(district) = params.district else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody::new("Missing required query parameter: district")),
        )
            .into_response();
    };

    match district_calendar(state, district).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Resolve the latest file, open it and summarize one district.
///
/// The data file is resolved before the district registry is consulted, so an
/// empty store reports `NoDataAvailable` whatever the state of the districts.
pub async fn district_calendar(
    state: Arc<AppState>,
    district: String,
) -> Result<DistrictSummary, CalendarError> {
    let path = {
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || state.store.ensure_latest())
            .await
            .map_err(|e| CalendarError::Task(e.to_string()))??
    };
    let registry = state.districts().await?;
    debug!(district = %district, path = %path.display(), "Computing district calendar");

    let summary = tokio::task::spawn_blocking(move || -> Result<_, CalendarError> {
        let dataset = netcdf_parser::open_dataset(&path)?;
        Ok(summarize(
            &dataset,
            &registry,
            &district,
            &state.config.variables,
        )?)
    })
    .await
    .map_err(|e| CalendarError::Task(e.to_string()))??;

    info!(
        district = %summary.district,
        hours = summary.hourly.len(),
        degraded = summary.degraded,
        "Computed district calendar"
    );
    Ok(summary)
}
