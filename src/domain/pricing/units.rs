//! Unit normalization for raw usage figures
//!
//! Requests are normalized to requests per month, memory and ephemeral
//! storage to gigabytes. A month is a fixed 730 hours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::trace::CalculationTrace;
use crate::domain::DomainError;

/// Hours in a billing month
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Exact MB to GB factor (1 / 1024)
pub const MB_TO_GB: f64 = 0.0009765625;

/// Time unit a request count is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestUnit {
    #[serde(rename = "per second")]
    PerSecond,
    #[serde(rename = "per minute")]
    PerMinute,
    #[serde(rename = "per hour")]
    PerHour,
    #[serde(rename = "per day")]
    PerDay,
    #[serde(rename = "per month")]
    PerMonth,
    #[serde(rename = "million per month")]
    MillionPerMonth,
}

impl RequestUnit {
    pub const ALL: [RequestUnit; 6] = [
        Self::PerSecond,
        Self::PerMinute,
        Self::PerHour,
        Self::PerDay,
        Self::PerMonth,
        Self::MillionPerMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerSecond => "per second",
            Self::PerMinute => "per minute",
            Self::PerHour => "per hour",
            Self::PerDay => "per day",
            Self::PerMonth => "per month",
            Self::MillionPerMonth => "million per month",
        }
    }

    /// Multiplier from this unit to requests per month
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::PerSecond => 60.0 * 60.0 * HOURS_PER_MONTH,
            Self::PerMinute => 60.0 * HOURS_PER_MONTH,
            Self::PerHour => HOURS_PER_MONTH,
            Self::PerDay => HOURS_PER_MONTH / 24.0,
            Self::PerMonth => 1.0,
            Self::MillionPerMonth => 1_000_000.0,
        }
    }
}

impl fmt::Display for RequestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| DomainError::invalid_unit(format!("Unknown request unit: '{}'", s)))
    }
}

/// Unit for memory and ephemeral storage sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    #[serde(rename = "MB")]
    Mb,
    #[serde(rename = "GB")]
    Gb,
}

impl SizeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }

    /// Multiplier from this unit to gigabytes
    pub fn gb_factor(&self) -> f64 {
        match self {
            Self::Mb => MB_TO_GB,
            Self::Gb => 1.0,
        }
    }

    /// Parse a memory unit
    pub fn parse_memory(s: &str) -> Result<Self, DomainError> {
        Self::parse_named(s, "memory")
    }

    /// Parse an ephemeral storage unit
    pub fn parse_storage(s: &str) -> Result<Self, DomainError> {
        Self::parse_named(s, "storage")
    }

    fn parse_named(s: &str, kind: &str) -> Result<Self, DomainError> {
        match s {
            "MB" => Ok(Self::Mb),
            "GB" => Ok(Self::Gb),
            other => Err(DomainError::invalid_unit(format!(
                "Unknown {} unit: '{}'",
                kind, other
            ))),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_named(s, "size")
    }
}

/// Convert a request count to requests per month.
///
/// Fractional results are truncated toward zero.
pub fn normalize_requests(count: u64, unit: RequestUnit, trace: &mut CalculationTrace) -> u64 {
    if unit == RequestUnit::PerMonth {
        return count;
    }

    let factor = unit.monthly_factor();
    let per_month = if factor.fract() == 0.0 {
        count.saturating_mul(factor as u64)
    } else {
        (count as f64 * factor).trunc() as u64
    };

    trace.push(format!(
        "{} requests {} * {} = {} requests per month",
        count, unit, factor, per_month
    ));

    per_month
}

/// Convert a memory allocation to gigabytes
pub fn normalize_memory(amount: f64, unit: SizeUnit, trace: &mut CalculationTrace) -> f64 {
    to_gigabytes(amount, unit, "memory", trace)
}

/// Convert an ephemeral storage allocation to gigabytes
pub fn normalize_storage(amount: f64, unit: SizeUnit, trace: &mut CalculationTrace) -> f64 {
    to_gigabytes(amount, unit, "ephemeral storage", trace)
}

fn to_gigabytes(amount: f64, unit: SizeUnit, label: &str, trace: &mut CalculationTrace) -> f64 {
    match unit {
        SizeUnit::Gb => amount,
        SizeUnit::Mb => {
            let gigabytes = amount * unit.gb_factor();
            trace.push(format!(
                "{} MB * {} = {} GB {}",
                amount,
                unit.gb_factor(),
                gigabytes,
                label
            ));
            gigabytes
        }
    }
}
