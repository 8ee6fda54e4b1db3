//! Region listing endpoint

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, RegionsResponse};

/// GET /v1/regions
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<RegionsResponse>, ApiError> {
    debug!("Listing pricing regions");

    let regions = state
        .calculator
        .list_regions()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RegionsResponse { regions }))
}
