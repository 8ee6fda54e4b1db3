//! Serverless function cost engine
//!
//! Normalizes usage, applies free allowances and bills compute through a
//! progressive-rate tier table. Every step is recorded in a [`CalculationTrace`].

mod calculator;
mod free_tier;
mod repository;
mod request;
mod table;
mod tier;
mod trace;
mod units;

pub use calculator::{calculate, calculate_usage, CalculationResult};
pub use free_tier::{
    billable_compute_gb_seconds, billable_requests, billable_storage_gb,
    FREE_TIER_COMPUTE_GB_SECONDS, FREE_TIER_REQUESTS, INCLUDED_EPHEMERAL_STORAGE_GB,
};
pub use repository::PricingRepository;
pub use request::{CalculationRequest, UsageRequest};
pub use table::{
    Architecture, ArchitecturePricing, PriceValue, PricingTable, RawArchitecturePricing,
    RawRegionPricing,
};
pub use tier::{parse_threshold, tiered_cost, Tier, TierTable, TieredCost};
pub use trace::CalculationTrace;
pub use units::{
    normalize_memory, normalize_requests, normalize_storage, RequestUnit, SizeUnit,
    HOURS_PER_MONTH, MB_TO_GB,
};

#[cfg(test)]
pub use repository::MockPricingRepository;
