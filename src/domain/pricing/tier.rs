//! Progressive-rate (tiered) billing

use serde::{Deserialize, Serialize};

use super::trace::CalculationTrace;
use crate::domain::DomainError;

/// Upper bound of a usage slice and the rate billed inside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Cumulative usage (GB-seconds) at which this tier ends
    pub threshold: f64,
    /// USD per GB-second inside this tier
    pub rate: f64,
}

impl Tier {
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }
}

/// Tiers sorted ascending by threshold, with distinct non-negative thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Build a table from tiers in any order
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Result<Self, DomainError> {
        let mut tiers: Vec<Tier> = tiers.into_iter().collect();

        for tier in &tiers {
            if !tier.threshold.is_finite() || tier.threshold < 0.0 {
                return Err(DomainError::malformed_pricing(format!(
                    "tier threshold must be a non-negative number, got {}",
                    tier.threshold
                )));
            }
            validate_rate(tier.rate, "tier rate")?;
        }

        tiers.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        if let Some(pair) = tiers.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(DomainError::malformed_pricing(format!(
                "duplicate tier threshold {}",
                pair[0].threshold
            )));
        }

        Ok(Self { tiers })
    }

    /// Build a table from textual thresholds, as they appear as keys in pricing documents
    pub fn from_entries<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, DomainError> {
        let tiers = entries
            .into_iter()
            .map(|(threshold, rate)| Ok(Tier::new(parse_threshold(threshold.as_ref())?, rate)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        Self::new(tiers)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }
}

/// Parse a tier threshold written as text (e.g. `"6000000000"` or `"1.5e9"`)
pub fn parse_threshold(raw: &str) -> Result<f64, DomainError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DomainError::malformed_pricing(format!("tier threshold '{}' is not numeric", raw)))
}

pub(crate) fn validate_rate(rate: f64, what: &str) -> Result<f64, DomainError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(DomainError::malformed_pricing(format!(
            "{} must be a non-negative number, got {}",
            what, rate
        )))
    }
}

/// Outcome of billing usage against a tier table
#[derive(Debug, Clone, PartialEq)]
pub struct TieredCost {
    pub cost: f64,
    pub trace: CalculationTrace,
}

/// Bill `usage` GB-seconds slice by slice.
///
/// Each tier bills the usage between the previous threshold and its own;
/// usage beyond the last threshold is billed at `overflow_rate`.
pub fn tiered_cost(usage: f64, table: &TierTable, overflow_rate: f64) -> TieredCost {
    let mut trace = CalculationTrace::new();
    let mut cost = 0.0;
    let mut previous_threshold = 0.0;

    for tier in table.tiers() {
        let slice = usage.min(tier.threshold) - previous_threshold;

        if slice > 0.0 {
            let slice_cost = slice * tier.rate;
            cost += slice_cost;
            previous_threshold += slice;
            trace.push(format!(
                "{} GB-s x {} USD = {} USD",
                slice, tier.rate, slice_cost
            ));
        }

        if usage <= tier.threshold {
            push_total(&mut trace, cost);
            return TieredCost { cost, trace };
        }
    }

    if usage > previous_threshold {
        let remainder = usage - previous_threshold;
        let overflow_cost = remainder * overflow_rate;
        cost += overflow_cost;
        trace.push(format!(
            "{} GB-s x {} USD = {} USD",
            remainder, overflow_rate, overflow_cost
        ));
    }

    push_total(&mut trace, cost);
    TieredCost { cost, trace }
}

fn push_total(trace: &mut CalculationTrace, cost: f64) {
    trace.push(format!(
        "Total tier cost: {} USD (monthly compute charges)",
        cost
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn single_tier() -> TierTable {
        TierTable::from_entries([("1000", 0.01)]).unwrap()
    }

    fn three_tiers() -> TierTable {
        TierTable::from_entries([("15000", 0.5), ("6000", 1.0), ("20000", 0.25)]).unwrap()
    }

    #[test]
    fn test_usage_below_first_threshold() {
        let result = tiered_cost(500.0, &single_tier(), 0.02);

        assert!(close(result.cost, 5.0));
        assert_eq!(result.trace.len(), 2);
    }

    #[test]
    fn test_overflow_beyond_last_tier() {
        let result = tiered_cost(1500.0, &single_tier(), 0.02);

        // 1000 x 0.01 + 500 x 0.02
        assert!(close(result.cost, 20.0));
        assert_eq!(
            result.trace.steps(),
            &[
                "1000 GB-s x 0.01 USD = 10 USD",
                "500 GB-s x 0.02 USD = 10 USD",
                "Total tier cost: 20 USD (monthly compute charges)",
            ]
        );
    }

    #[test]
    fn test_usage_exactly_at_threshold_has_no_overflow() {
        let result = tiered_cost(1000.0, &single_tier(), 0.02);

        assert!(close(result.cost, 10.0));
        assert_eq!(
            result.trace.steps(),
            &[
                "1000 GB-s x 0.01 USD = 10 USD",
                "Total tier cost: 10 USD (monthly compute charges)",
            ]
        );
    }

    #[test]
    fn test_empty_table_bills_everything_at_overflow() {
        let result = tiered_cost(500.0, &TierTable::default(), 0.02);

        assert!(close(result.cost, 10.0));
        assert_eq!(result.trace.steps()[0], "500 GB-s x 0.02 USD = 10 USD");
    }

    #[test]
    fn test_zero_usage_has_no_slice_lines() {
        let result = tiered_cost(0.0, &three_tiers(), 0.1);

        assert_eq!(result.cost, 0.0);
        assert_eq!(
            result.trace.steps(),
            &["Total tier cost: 0 USD (monthly compute charges)"]
        );

        let empty = tiered_cost(0.0, &TierTable::default(), 0.1);
        assert_eq!(empty.cost, 0.0);
        assert_eq!(empty.trace.len(), 1);
    }

    #[test]
    fn test_walks_tiers_in_ascending_order() {
        // 6000 x 1.0 + 9000 x 0.5 + 2000 x 0.25
        let result = tiered_cost(17_000.0, &three_tiers(), 0.1);

        assert!(close(result.cost, 6000.0 + 4500.0 + 500.0));
        assert_eq!(result.trace.steps()[0], "6000 GB-s x 1 USD = 6000 USD");
        assert_eq!(result.trace.steps()[1], "9000 GB-s x 0.5 USD = 4500 USD");
        assert_eq!(result.trace.steps()[2], "2000 GB-s x 0.25 USD = 500 USD");
    }

    #[test]
    fn test_continuous_across_thresholds() {
        let table = three_tiers();
        let overflow = 0.1;
        let cost = |x: f64| tiered_cost(x, &table, overflow).cost;
        let d = 1e-3;

        for (threshold, next_rate) in [(6000.0, 0.5), (15_000.0, 0.25), (20_000.0, overflow)] {
            let at = cost(threshold);
            let below = cost(threshold - d);
            let above = cost(threshold + d);

            assert!(below <= at && at <= above);
            assert!((above - at - d * next_rate).abs() < 1e-6);
        }
    }

    #[test]
    fn test_non_decreasing() {
        let table = three_tiers();
        let mut last = 0.0;

        for step in 0..300 {
            let cost = tiered_cost(step as f64 * 100.0, &table, 0.1).cost;
            assert!(cost >= last);
            last = cost;
        }
    }

    #[test]
    fn test_table_sorts_and_parses_numeric_keys() {
        let table = TierTable::from_entries([("15000000000", 0.000015), ("6000000000", 0.0000166667)])
            .unwrap();

        assert_eq!(table.tiers()[0].threshold, 6_000_000_000.0);
        assert_eq!(table.tiers()[1].threshold, 15_000_000_000.0);
    }

    #[test]
    fn test_numeric_sort_not_lexicographic() {
        let table = TierTable::from_entries([("900", 0.1), ("1000", 0.2)]).unwrap();
        assert_eq!(table.tiers()[0].threshold, 900.0);
    }

    #[test]
    fn test_malformed_threshold() {
        let err = TierTable::from_entries([("lots", 0.1)]).unwrap_err();
        assert!(matches!(err, DomainError::MalformedPricingTable { .. }));
    }

    #[test]
    fn test_duplicate_and_negative_thresholds_rejected() {
        assert!(TierTable::from_entries([("1000", 0.1), ("1000.0", 0.2)]).is_err());
        assert!(TierTable::new([Tier::new(-1.0, 0.1)]).is_err());
        assert!(TierTable::new([Tier::new(10.0, f64::NAN)]).is_err());
    }
}
