//! Calculation input: the raw request and its normalized form

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::table::Architecture;
use super::trace::CalculationTrace;
use super::units::{normalize_memory, normalize_requests, normalize_storage, RequestUnit, SizeUnit};
use crate::domain::DomainError;

/// Usage parameters for one cost estimate, in the units the caller chose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_platform_limits"))]
pub struct CalculationRequest {
    #[validate(length(min = 1, message = "region must not be empty"))]
    pub region: String,
    pub architecture: Architecture,
    #[validate(range(min = 1, message = "number_of_requests must be greater than 0"))]
    pub number_of_requests: u64,
    pub request_unit: RequestUnit,
    #[validate(range(
        exclusive_min = 0.0,
        message = "duration_of_each_request_in_ms must be greater than 0"
    ))]
    pub duration_of_each_request_in_ms: f64,
    #[validate(range(exclusive_min = 0.0, message = "memory must be greater than 0"))]
    pub memory: f64,
    pub memory_unit: SizeUnit,
    #[validate(range(exclusive_min = 0.0, message = "ephemeral_storage must be greater than 0"))]
    pub ephemeral_storage: f64,
    pub storage_unit: SizeUnit,
    pub include_free_tier: bool,
}

impl Default for CalculationRequest {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            architecture: Architecture::X86,
            number_of_requests: 1_000_000,
            request_unit: RequestUnit::PerDay,
            duration_of_each_request_in_ms: 1500.0,
            memory: 128.0,
            memory_unit: SizeUnit::Mb,
            ephemeral_storage: 512.0,
            storage_unit: SizeUnit::Mb,
            include_free_tier: true,
        }
    }
}

impl CalculationRequest {
    /// Check positivity and the platform's memory and storage limits
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|errors| DomainError::validation(validation_message(&errors)))
    }
}

fn validate_platform_limits(request: &CalculationRequest) -> Result<(), ValidationError> {
    if !request.duration_of_each_request_in_ms.is_finite() {
        return Err(limit_error(
            "duration",
            "duration_of_each_request_in_ms must be a finite number",
        ));
    }

    let memory_ok = match request.memory_unit {
        SizeUnit::Mb => (128.0..=10240.0).contains(&request.memory),
        SizeUnit::Gb => (0.125..=10.24).contains(&request.memory),
    };
    if !memory_ok {
        return Err(limit_error(
            "memory_limits",
            match request.memory_unit {
                SizeUnit::Mb => "Memory must be between 128 MB and 10,240 MB",
                SizeUnit::Gb => "Memory must be between 0.125 GB and 10.24 GB",
            },
        ));
    }

    let storage_ok = match request.storage_unit {
        SizeUnit::Mb => (512.0..=10240.0).contains(&request.ephemeral_storage),
        SizeUnit::Gb => (0.5..=10.24).contains(&request.ephemeral_storage),
    };
    if !storage_ok {
        return Err(limit_error(
            "storage_limits",
            match request.storage_unit {
                SizeUnit::Mb => "Ephemeral storage must be between 512 MB and 10,240 MB",
                SizeUnit::Gb => "Ephemeral storage must be between 0.5 GB and 10.24 GB",
            },
        ));
    }

    Ok(())
}

fn limit_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_values()
        .flatten()
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => format!("invalid value ({})", error.code),
        })
        .collect();

    messages.sort();
    messages.join("; ")
}

/// Usage in canonical units: requests per month, gigabytes, milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageRequest {
    pub requests_per_month: u64,
    pub duration_ms: f64,
    pub memory_gb: f64,
    pub storage_gb: f64,
    pub include_free_tier: bool,
    pub architecture: Architecture,
}

impl UsageRequest {
    /// Normalize a raw request, recording each non-identity conversion
    pub fn normalize(request: &CalculationRequest, trace: &mut CalculationTrace) -> Self {
        let requests_per_month =
            normalize_requests(request.number_of_requests, request.request_unit, trace);
        let memory_gb = normalize_memory(request.memory, request.memory_unit, trace);
        let storage_gb = normalize_storage(request.ephemeral_storage, request.storage_unit, trace);

        Self {
            requests_per_month,
            duration_ms: request.duration_of_each_request_in_ms,
            memory_gb,
            storage_gb,
            include_free_tier: request.include_free_tier,
            architecture: request.architecture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = CalculationRequest::default();

        assert_eq!(request.region, "us-east-1");
        assert_eq!(request.architecture, Architecture::X86);
        assert_eq!(request.number_of_requests, 1_000_000);
        assert_eq!(request.request_unit, RequestUnit::PerDay);
        assert_eq!(request.duration_of_each_request_in_ms, 1500.0);
        assert_eq!(request.memory, 128.0);
        assert_eq!(request.ephemeral_storage, 512.0);
        assert!(request.include_free_tier);
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"memory": 1, "memory_unit": "GB", "request_unit": "per month"}"#)
                .unwrap();

        assert_eq!(request.memory, 1.0);
        assert_eq!(request.memory_unit, SizeUnit::Gb);
        assert_eq!(request.request_unit, RequestUnit::PerMonth);
        assert_eq!(request.region, "us-east-1");
    }

    #[test]
    fn test_memory_limits() {
        let too_small = CalculationRequest {
            memory: 127.0,
            ..Default::default()
        };
        let err = too_small.check().unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("Memory must be between 128 MB and 10,240 MB"));

        let too_large_gb = CalculationRequest {
            memory: 10.25,
            memory_unit: SizeUnit::Gb,
            ..Default::default()
        };
        assert!(too_large_gb
            .check()
            .unwrap_err()
            .to_string()
            .contains("Memory must be between 0.125 GB and 10.24 GB"));

        let edge = CalculationRequest {
            memory: 10240.0,
            ..Default::default()
        };
        assert!(edge.check().is_ok());
    }

    #[test]
    fn test_storage_limits() {
        let small = CalculationRequest {
            ephemeral_storage: 511.0,
            ..Default::default()
        };
        assert!(small
            .check()
            .unwrap_err()
            .to_string()
            .contains("Ephemeral storage must be between 512 MB and 10,240 MB"));

        let gb = CalculationRequest {
            ephemeral_storage: 0.4,
            storage_unit: SizeUnit::Gb,
            ..Default::default()
        };
        assert!(gb
            .check()
            .unwrap_err()
            .to_string()
            .contains("Ephemeral storage must be between 0.5 GB and 10.24 GB"));
    }

    #[test]
    fn test_positive_fields() {
        let zero_requests = CalculationRequest {
            number_of_requests: 0,
            ..Default::default()
        };
        assert!(zero_requests
            .check()
            .unwrap_err()
            .to_string()
            .contains("number_of_requests must be greater than 0"));

        let zero_duration = CalculationRequest {
            duration_of_each_request_in_ms: 0.0,
            ..Default::default()
        };
        assert!(zero_duration.check().is_err());

        let empty_region = CalculationRequest {
            region: String::new(),
            ..Default::default()
        };
        assert!(empty_region.check().is_err());
    }

    #[test]
    fn test_normalize_default_request() {
        let mut trace = CalculationTrace::new();
        let usage = UsageRequest::normalize(&CalculationRequest::default(), &mut trace);

        assert_eq!(usage.requests_per_month, (1_000_000f64 * 730.0 / 24.0) as u64);
        assert_eq!(usage.memory_gb, 0.125);
        assert_eq!(usage.storage_gb, 0.5);
        assert_eq!(usage.duration_ms, 1500.0);
        assert_eq!(trace.len(), 3);
        assert!(trace.steps()[0].contains("requests per day"));
        assert!(trace.steps()[1].ends_with("GB memory"));
        assert!(trace.steps()[2].ends_with("GB ephemeral storage"));
    }
}
