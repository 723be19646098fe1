//! District listing.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::error::CalendarError;
use crate::state::AppState;

/// GET /districts - Sorted, de-duplicated district names
pub async fn districts_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<String>>, CalendarError> {
    let registry = state.districts().await?;
    Ok(Json(registry.names()))
}
