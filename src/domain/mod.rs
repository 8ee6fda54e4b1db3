//! Domain layer - Cost engine, pricing types and errors

pub mod error;
pub mod pricing;

pub use error::DomainError;
pub use pricing::{
    calculate, tiered_cost, Architecture, CalculationRequest, CalculationResult,
    CalculationTrace, PricingRepository, PricingTable, RequestUnit, SizeUnit, UsageRequest,
};
