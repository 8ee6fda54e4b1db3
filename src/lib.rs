//! Lambda Cost Calculator
//!
//! Monthly cost estimates for serverless functions:
//! - Unit normalization, free-tier allowances and tiered compute billing
//! - A step-by-step calculation trace for every estimate
//! - Per-region pricing from a built-in catalog or a directory of documents
//! - HTTP API and command-line front ends

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::pricing::{load_catalog, CalculatorService};
use tracing::info;

/// Load the pricing catalog and build the calculator service
pub fn create_calculator(config: &AppConfig) -> anyhow::Result<Arc<CalculatorService>> {
    let repository = load_catalog(&config.pricing)?;

    if repository.is_empty() {
        anyhow::bail!("Pricing catalog is empty");
    }

    info!(
        regions = repository.len(),
        default_region = %config.pricing.default_region,
        "Calculator ready"
    );

    Ok(Arc::new(CalculatorService::new(Arc::new(repository))))
}

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(create_calculator(config)?))
}
