//! Monthly cost composition across compute, requests and ephemeral storage

use serde::{Deserialize, Serialize};

use super::free_tier::{billable_compute_gb_seconds, billable_requests, billable_storage_gb};
use super::request::{CalculationRequest, UsageRequest};
use super::table::{ArchitecturePricing, PricingTable};
use super::tier::tiered_cost;
use super::trace::CalculationTrace;
use crate::domain::DomainError;

/// Milliseconds to seconds
const MS_TO_SECONDS: f64 = 0.001;

/// Total monthly cost and the steps that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// USD per month
    pub total_cost: f64,
    #[serde(rename = "calculation_steps")]
    pub trace: CalculationTrace,
}

/// Estimate the monthly cost of a raw request against one region's pricing
pub fn calculate(
    request: &CalculationRequest,
    table: &PricingTable,
) -> Result<CalculationResult, DomainError> {
    let mut trace = CalculationTrace::new();
    let usage = UsageRequest::normalize(request, &mut trace);

    calculate_usage(&usage, table, trace)
}

/// Estimate the monthly cost of already-normalized usage, appending to `trace`
pub fn calculate_usage(
    usage: &UsageRequest,
    table: &PricingTable,
    mut trace: CalculationTrace,
) -> Result<CalculationResult, DomainError> {
    let pricing = table.architecture(usage.architecture)?;

    let (compute_cost, compute_seconds) = compute_charges(usage, pricing, &mut trace);
    let request_cost = request_charges(usage, table.request_rate(), &mut trace);
    let storage_cost =
        storage_charges(usage, compute_seconds, table.storage_rate(), &mut trace);

    let total_cost = compute_cost + request_cost + storage_cost;
    if !total_cost.is_finite() {
        return Err(DomainError::internal(format!(
            "Calculated cost is not a finite number ({} USD)",
            total_cost
        )));
    }

    trace.push(format!(
        "{} USD + {} USD + {} USD = {} USD",
        compute_cost, request_cost, storage_cost, total_cost
    ));
    trace.push(format!("Lambda cost (monthly): {} USD", total_cost));

    Ok(CalculationResult { total_cost, trace })
}

fn compute_charges(
    usage: &UsageRequest,
    pricing: &ArchitecturePricing,
    trace: &mut CalculationTrace,
) -> (f64, f64) {
    let compute_seconds = usage.requests_per_month as f64 * (usage.duration_ms * MS_TO_SECONDS);
    trace.push(format!(
        "{} requests x {} ms x {} ms to sec conversion factor = {} total compute (seconds)",
        usage.requests_per_month, usage.duration_ms, MS_TO_SECONDS, compute_seconds
    ));

    let gb_seconds = usage.memory_gb * compute_seconds;
    trace.push(format!(
        "{} GB x {} seconds = {} total compute (GB-s)",
        usage.memory_gb, compute_seconds, gb_seconds
    ));

    let billable = billable_compute_gb_seconds(gb_seconds, usage.include_free_tier, trace);

    let tiered = tiered_cost(billable, &pricing.tiers, pricing.overflow_rate);
    trace.extend(tiered.trace);
    trace.push(format!("Monthly compute charges: {} USD", tiered.cost));

    (tiered.cost, compute_seconds)
}

fn request_charges(usage: &UsageRequest, rate: f64, trace: &mut CalculationTrace) -> f64 {
    let billable = billable_requests(usage.requests_per_month, usage.include_free_tier, trace);
    let cost = billable as f64 * rate;

    if cost > 0.0 {
        trace.push(format!(
            "{} requests x {} USD = {} USD (monthly request charges)",
            billable, rate, cost
        ));
    }

    cost
}

// Ephemeral storage is billed per GB-second of total invocation time.
fn storage_charges(
    usage: &UsageRequest,
    compute_seconds: f64,
    rate: f64,
    trace: &mut CalculationTrace,
) -> f64 {
    let billable_gb = billable_storage_gb(usage.storage_gb, trace);

    if billable_gb <= 0.0 {
        return 0.0;
    }

    let gb_seconds = compute_seconds * billable_gb;
    trace.push(format!(
        "{} seconds x {} GB = {} total storage (GB-s)",
        compute_seconds, billable_gb, gb_seconds
    ));

    let cost = gb_seconds * rate;
    trace.push(format!(
        "{} GB-s x {} USD = {} USD (monthly ephemeral storage charges)",
        gb_seconds, rate, cost
    ));

    cost
}
