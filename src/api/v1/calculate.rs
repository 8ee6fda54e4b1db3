//! Cost calculation endpoint

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CalculateRequestBody, CalculateResponse, Json as JsonBody};

/// POST /v1/calculate
pub async fn calculate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CalculateRequestBody>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let verbose = body.verbose();
    let request = body.into_request()?;

    debug!(region = %request.region, verbose, "Calculating monthly cost");

    let result = state
        .calculator
        .calculate(&request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(CalculateResponse::from_result(result, verbose)))
}
