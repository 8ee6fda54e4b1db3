//! Pricing repository trait

use std::sync::Arc;

use async_trait::async_trait;

use super::table::PricingTable;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read-only lookup of region pricing tables
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PricingRepository: Send + Sync {
    /// Finds the pricing table for a region code
    async fn find_by_region(&self, region: &str)
        -> Result<Option<Arc<PricingTable>>, DomainError>;

    /// Lists region codes with pricing, sorted
    async fn list_regions(&self) -> Result<Vec<String>, DomainError>;
}
