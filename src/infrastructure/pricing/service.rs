//! Cost calculation service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::pricing::{self, CalculationRequest, CalculationResult, PricingRepository};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Trait for the calculator service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CalculatorServiceTrait: Send + Sync {
    /// Validate a request and estimate its monthly cost
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, DomainError>;

    /// Region codes with pricing, sorted
    async fn list_regions(&self) -> Result<Vec<String>, DomainError>;
}

/// Calculator service backed by a pricing repository
pub struct CalculatorService {
    repository: Arc<dyn PricingRepository>,
}

impl std::fmt::Debug for CalculatorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorService").finish_non_exhaustive()
    }
}

impl CalculatorService {
    pub fn new(repository: Arc<dyn PricingRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CalculatorServiceTrait for CalculatorService {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, DomainError> {
        request.check()?;

        let table = self
            .repository
            .find_by_region(&request.region)
            .await?
            .ok_or_else(|| DomainError::unknown_region(&request.region))?;

        let result = pricing::calculate(request, &table)?;

        debug!(steps = result.trace.len(), "Calculation trace recorded");
        info!(
            region = %request.region,
            architecture = %request.architecture,
            total_cost = result.total_cost,
            "Calculated monthly cost"
        );

        Ok(result)
    }

    async fn list_regions(&self) -> Result<Vec<String>, DomainError> {
        self.repository.list_regions().await
    }
}
