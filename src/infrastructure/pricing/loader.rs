//! Loading region pricing documents

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::InMemoryPricingRepository;
use crate::config::PricingConfig;
use crate::domain::pricing::PricingTable;
use crate::domain::DomainError;

/// Pricing documents compiled into the binary
const BUILTIN_PRICING: [(&str, &str); 4] = [
    ("ap-southeast-1", include_str!("../../../pricing/ap-southeast-1.json")),
    ("eu-west-1", include_str!("../../../pricing/eu-west-1.json")),
    ("us-east-1", include_str!("../../../pricing/us-east-1.json")),
    ("us-west-2", include_str!("../../../pricing/us-west-2.json")),
];

/// Parse the built-in catalog
pub fn load_builtin() -> Result<Vec<PricingTable>, DomainError> {
    BUILTIN_PRICING
        .iter()
        .map(|(region, json)| PricingTable::from_json(*region, json))
        .collect()
}

/// Parse every `<region>.json` document in `dir`. Any failure aborts the whole load.
pub fn load_dir(dir: &Path) -> Result<Vec<PricingTable>, DomainError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        DomainError::storage(format!(
            "Failed to read pricing directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut tables = Vec::new();

    for entry in entries {
        let path = entry
            .map_err(|e| DomainError::storage(format!("Failed to read directory entry: {}", e)))?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let Some(region) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let json = fs::read_to_string(&path).map_err(|e| {
            DomainError::storage(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        debug!(region = %region, path = %path.display(), "Loading pricing document");
        tables.push(PricingTable::from_json(region, &json)?);
    }

    if tables.is_empty() {
        return Err(DomainError::configuration(format!(
            "No pricing documents found in '{}'",
            dir.display()
        )));
    }

    tables.sort_by(|a, b| a.region().cmp(b.region()));
    Ok(tables)
}

/// Build the pricing repository the application runs against
pub fn load_catalog(config: &PricingConfig) -> Result<InMemoryPricingRepository, DomainError> {
    let tables = match &config.data_dir {
        Some(dir) => load_dir(dir)?,
        None => load_builtin()?,
    };

    let source = config
        .data_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    info!(regions = tables.len(), source = %source, "Pricing catalog loaded");

    Ok(InMemoryPricingRepository::new(tables))
}
