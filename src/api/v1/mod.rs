//! v1 API endpoints

pub mod calculate;
pub mod regions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate::calculate))
        .route("/regions", get(regions::list_regions))
}
