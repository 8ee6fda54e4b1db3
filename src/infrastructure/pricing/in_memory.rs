//! In-memory pricing repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pricing::{PricingRepository, PricingTable};
use crate::domain::DomainError;

/// Pricing tables keyed by region code, fixed at construction
#[derive(Debug, Default, Clone)]
pub struct InMemoryPricingRepository {
    tables: HashMap<String, Arc<PricingTable>>,
}

impl InMemoryPricingRepository {
    pub fn new(tables: impl IntoIterator<Item = PricingTable>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|table| (table.region().to_string(), Arc::new(table)))
                .collect(),
        }
    }

    pub fn with_table(mut self, table: PricingTable) -> Self {
        self.tables
            .insert(table.region().to_string(), Arc::new(table));
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[async_trait]
impl PricingRepository for InMemoryPricingRepository {
    async fn find_by_region(
        &self,
        region: &str,
    ) -> Result<Option<Arc<PricingTable>>, DomainError> {
        Ok(self.tables.get(region).cloned())
    }

    async fn list_regions(&self) -> Result<Vec<String>, DomainError> {
        let mut regions: Vec<String> = self.tables.keys().cloned().collect();
        regions.sort();
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_region() {
        let repo = InMemoryPricingRepository::new([PricingTable::new("us-east-1", 0.1, 0.2)]);

        let found = repo.find_by_region("us-east-1").await.unwrap().unwrap();
        assert_eq!(found.request_rate(), 0.1);

        assert!(repo.find_by_region("us-east-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_regions_sorted() {
        let repo = InMemoryPricingRepository::default()
            .with_table(PricingTable::new("us-west-2", 0.1, 0.1))
            .with_table(PricingTable::new("ap-southeast-1", 0.1, 0.1))
            .with_table(PricingTable::new("eu-west-1", 0.1, 0.1));

        assert_eq!(
            repo.list_regions().await.unwrap(),
            vec!["ap-southeast-1", "eu-west-1", "us-west-2"]
        );
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn test_shared_table_is_not_copied() {
        let repo = InMemoryPricingRepository::new([PricingTable::new("us-east-1", 0.1, 0.2)]);

        let a = repo.find_by_region("us-east-1").await.unwrap().unwrap();
        let b = repo.find_by_region("us-east-1").await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
