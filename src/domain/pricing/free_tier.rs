//! Monthly free allowances

use super::trace::CalculationTrace;

/// Requests per month that are not billed
pub const FREE_TIER_REQUESTS: u64 = 1_000_000;

/// Compute GB-seconds per month that are not billed
pub const FREE_TIER_COMPUTE_GB_SECONDS: f64 = 400_000.0;

/// Ephemeral storage included with every function, regardless of free tier
pub const INCLUDED_EPHEMERAL_STORAGE_GB: f64 = 0.5;

/// Requests left to bill after the free allowance
pub fn billable_requests(requests: u64, include_free_tier: bool, trace: &mut CalculationTrace) -> u64 {
    if !include_free_tier {
        return requests;
    }

    let billable = requests.saturating_sub(FREE_TIER_REQUESTS);
    trace.push(format!(
        "{} requests - {} free tier requests = {} monthly billable requests",
        requests, FREE_TIER_REQUESTS, billable
    ));

    billable
}

/// Compute GB-seconds left to bill after the free allowance
pub fn billable_compute_gb_seconds(
    gb_seconds: f64,
    include_free_tier: bool,
    trace: &mut CalculationTrace,
) -> f64 {
    if !include_free_tier {
        return gb_seconds;
    }

    let billable = (gb_seconds - FREE_TIER_COMPUTE_GB_SECONDS).max(0.0);
    trace.push(format!(
        "{} GB-s - {} free tier GB-s = {} total billable GB-s",
        gb_seconds, FREE_TIER_COMPUTE_GB_SECONDS, billable
    ));

    billable
}

/// Ephemeral storage GB above the included amount
pub fn billable_storage_gb(storage_gb: f64, trace: &mut CalculationTrace) -> f64 {
    let billable = (storage_gb - INCLUDED_EPHEMERAL_STORAGE_GB).max(0.0);
    trace.push(format!(
        "{} GB - {} GB (no additional charges) = {} GB billable ephemeral storage",
        storage_gb, INCLUDED_EPHEMERAL_STORAGE_GB, billable
    ));

    billable
}
