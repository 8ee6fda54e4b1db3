//! Per-region pricing table

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::tier::{validate_rate, TierTable};
use crate::domain::DomainError;

/// CPU architecture a function runs on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    #[default]
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "arm64")]
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Self::X86, Self::Arm64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid_architecture(format!("Unknown architecture: '{}'", s))
            })
    }
}

/// Compute pricing for one architecture
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitecturePricing {
    pub tiers: TierTable,
    /// USD per GB-second beyond the last tier threshold
    pub overflow_rate: f64,
}

impl ArchitecturePricing {
    pub fn new(tiers: TierTable, overflow_rate: f64) -> Self {
        Self {
            tiers,
            overflow_rate,
        }
    }
}

/// Validated pricing for one region
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    region: String,
    request_rate: f64,
    storage_rate: f64,
    architectures: HashMap<Architecture, ArchitecturePricing>,
}

impl PricingTable {
    pub fn new(region: impl Into<String>, request_rate: f64, storage_rate: f64) -> Self {
        Self {
            region: region.into(),
            request_rate,
            storage_rate,
            architectures: HashMap::new(),
        }
    }

    pub fn with_architecture(mut self, arch: Architecture, pricing: ArchitecturePricing) -> Self {
        self.architectures.insert(arch, pricing);
        self
    }

    /// Parse and validate a region pricing document
    pub fn from_json(region: impl Into<String>, json: &str) -> Result<Self, DomainError> {
        let region = region.into();
        let raw: RawRegionPricing = serde_json::from_str(json).map_err(|e| {
            DomainError::malformed_pricing(format!("region '{}': {}", region, e))
        })?;

        Self::from_raw(region, raw)
    }

    pub fn from_raw(region: impl Into<String>, raw: RawRegionPricing) -> Result<Self, DomainError> {
        let region = region.into();
        let context = |e: DomainError| match e {
            DomainError::MalformedPricingTable { message } => {
                DomainError::malformed_pricing(format!("region '{}': {}", region, message))
            }
            other => other,
        };

        let request_rate = required_rate(raw.requests, "Requests").map_err(context)?;
        let storage_rate =
            required_rate(raw.ephemeral_storage, "EphemeralStorage").map_err(context)?;

        let mut table = Self::new(region.clone(), request_rate, storage_rate);

        for (arch, section) in [(Architecture::X86, raw.x86), (Architecture::Arm64, raw.arm64)] {
            if let Some(section) = section {
                let pricing = section.into_pricing(arch).map_err(context)?;
                table.architectures.insert(arch, pricing);
            }
        }

        Ok(table)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// USD per billable request
    pub fn request_rate(&self) -> f64 {
        self.request_rate
    }

    /// USD per GB-second of ephemeral storage
    pub fn storage_rate(&self) -> f64 {
        self.storage_rate
    }

    /// Compute pricing for an architecture
    pub fn architecture(&self, arch: Architecture) -> Result<&ArchitecturePricing, DomainError> {
        self.architectures.get(&arch).ok_or_else(|| {
            DomainError::invalid_architecture(format!(
                "No pricing for architecture '{}' in region '{}'",
                arch, self.region
            ))
        })
    }

    /// Architectures with pricing, in declaration order
    pub fn architectures(&self) -> Vec<Architecture> {
        Architecture::ALL
            .into_iter()
            .filter(|a| self.architectures.contains_key(a))
            .collect()
    }
}

/// A price as it appears in pricing documents: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    fn to_rate(&self, what: &str) -> Result<f64, DomainError> {
        let rate = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                DomainError::malformed_pricing(format!("{} '{}' is not numeric", what, s))
            })?,
        };

        validate_rate(rate, what)
    }
}

/// Region pricing document
#[derive(Debug, Clone, Deserialize)]
pub struct RawRegionPricing {
    #[serde(rename = "Requests")]
    pub requests: Option<PriceValue>,
    #[serde(rename = "EphemeralStorage")]
    pub ephemeral_storage: Option<PriceValue>,
    pub x86: Option<RawArchitecturePricing>,
    pub arm64: Option<RawArchitecturePricing>,
}

/// Architecture section of a region pricing document. The per-memory price list is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArchitecturePricing {
    /// Threshold/rate pairs in document order, repeated keys included
    #[serde(rename = "Tier", default, deserialize_with = "tier_entries")]
    pub tier: Vec<(String, PriceValue)>,
    #[serde(rename = "OverflowRate")]
    pub overflow_rate: Option<PriceValue>,
}

impl RawArchitecturePricing {
    fn into_pricing(self, arch: Architecture) -> Result<ArchitecturePricing, DomainError> {
        let label = format!("{} tier rate", arch);
        let entries = self
            .tier
            .iter()
            .map(|(threshold, rate)| Ok((threshold.as_str(), rate.to_rate(&label)?)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        let tiers = TierTable::from_entries(entries)?;
        let overflow_rate = required_rate(self.overflow_rate, &format!("{} OverflowRate", arch))?;

        Ok(ArchitecturePricing::new(tiers, overflow_rate))
    }
}

// Keeps every entry of the `Tier` object so a repeated threshold is rejected
// by `TierTable` instead of being collapsed by a map.
fn tier_entries<'de, D>(deserializer: D) -> Result<Vec<(String, PriceValue)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TierEntries;

    impl<'de> Visitor<'de> for TierEntries {
        type Value = Vec<(String, PriceValue)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of tier thresholds to rates")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, PriceValue>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(TierEntries)
}

fn required_rate(value: Option<PriceValue>, what: &str) -> Result<f64, DomainError> {
    value
        .ok_or_else(|| DomainError::malformed_pricing(format!("missing {}", what)))?
        .to_rate(what)
}
