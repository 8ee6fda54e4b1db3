//! Calculation request and response bodies

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::pricing::{
    Architecture, CalculationRequest, CalculationResult, RequestUnit, SizeUnit,
};

/// POST /v1/calculate body. Fields are optional here so a missing one is
/// reported by name instead of as a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateRequestBody {
    pub region: Option<String>,
    pub architecture: Option<String>,
    pub number_of_requests: Option<u64>,
    pub request_unit: Option<String>,
    pub duration_of_each_request_in_ms: Option<f64>,
    pub memory: Option<f64>,
    pub memory_unit: Option<String>,
    pub ephemeral_storage: Option<f64>,
    pub storage_unit: Option<String>,
    pub include_free_tier: Option<bool>,
    pub verbose: Option<bool>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

impl CalculateRequestBody {
    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Check required fields and parse enumerated values
    pub fn into_request(self) -> Result<CalculationRequest, ApiError> {
        let region = required(self.region, "region")?;
        let architecture = required(self.architecture, "architecture")?;
        let number_of_requests = required(self.number_of_requests, "number_of_requests")?;
        let request_unit = required(self.request_unit, "request_unit")?;
        let duration = required(
            self.duration_of_each_request_in_ms,
            "duration_of_each_request_in_ms",
        )?;
        let memory = required(self.memory, "memory")?;
        let memory_unit = required(self.memory_unit, "memory_unit")?;
        let ephemeral_storage = required(self.ephemeral_storage, "ephemeral_storage")?;
        let storage_unit = required(self.storage_unit, "storage_unit")?;

        Ok(CalculationRequest {
            region,
            architecture: architecture.parse::<Architecture>()?,
            number_of_requests,
            request_unit: request_unit
                .parse::<RequestUnit>()
                .map_err(|e| ApiError::from(e).with_param("request_unit"))?,
            duration_of_each_request_in_ms: duration,
            memory,
            memory_unit: SizeUnit::parse_memory(&memory_unit)
                .map_err(|e| ApiError::from(e).with_param("memory_unit"))?,
            ephemeral_storage,
            storage_unit: SizeUnit::parse_storage(&storage_unit)
                .map_err(|e| ApiError::from(e).with_param("storage_unit"))?,
            include_free_tier: self.include_free_tier.unwrap_or(true),
        })
    }
}

/// POST /v1/calculate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub status: String,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_steps: Option<Vec<String>>,
}

impl CalculateResponse {
    pub fn from_result(result: CalculationResult, verbose: bool) -> Self {
        Self {
            status: "success".to_string(),
            cost: result.total_cost,
            calculation_steps: verbose.then(|| result.trace.into_steps()),
        }
    }
}

/// GET /v1/regions response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::CalculationTrace;
    use axum::http::StatusCode;

    fn full_body() -> CalculateRequestBody {
        serde_json::from_str(
            r#"{
                "region": "us-east-1",
                "architecture": "arm64",
                "number_of_requests": 5,
                "request_unit": "million per month",
                "duration_of_each_request_in_ms": 200,
                "memory": 1,
                "memory_unit": "GB",
                "ephemeral_storage": 512,
                "storage_unit": "MB"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_into_request() {
        let request = full_body().into_request().unwrap();

        assert_eq!(request.architecture, Architecture::Arm64);
        assert_eq!(request.request_unit, RequestUnit::MillionPerMonth);
        assert_eq!(request.memory_unit, SizeUnit::Gb);
        assert_eq!(request.storage_unit, SizeUnit::Mb);
        assert_eq!(request.duration_of_each_request_in_ms, 200.0);
        assert!(request.include_free_tier);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = CalculateRequestBody::default().into_request().unwrap_err();
        assert_eq!(err.response.error.message, "Missing required field: 'region'");

        let body = CalculateRequestBody {
            storage_unit: None,
            ..full_body()
        };
        let err = body.into_request().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param.as_deref(), Some("storage_unit"));
    }

    #[test]
    fn test_invalid_units_and_architecture() {
        let body = CalculateRequestBody {
            request_unit: Some("per fortnight".to_string()),
            ..full_body()
        };
        let err = body.into_request().unwrap_err();
        assert!(err.response.error.message.contains("Unknown request unit"));
        assert_eq!(err.response.error.param.as_deref(), Some("request_unit"));

        let body = CalculateRequestBody {
            memory_unit: Some("KB".to_string()),
            ..full_body()
        };
        let err = body.into_request().unwrap_err();
        assert!(err.response.error.message.contains("Unknown memory unit"));

        let body = CalculateRequestBody {
            architecture: Some("riscv".to_string()),
            ..full_body()
        };
        let err = body.into_request().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param.as_deref(), Some("architecture"));
    }

    #[test]
    fn test_response_omits_steps_unless_verbose() {
        let mut trace = CalculationTrace::new();
        trace.push("Lambda cost (monthly): 1.5 USD");
        let result = CalculationResult {
            total_cost: 1.5,
            trace,
        };

        let quiet = serde_json::to_value(CalculateResponse::from_result(result.clone(), false))
            .unwrap();
        assert_eq!(quiet["status"], "success");
        assert_eq!(quiet["cost"], 1.5);
        assert!(quiet.get("calculation_steps").is_none());

        let verbose = serde_json::to_value(CalculateResponse::from_result(result, true)).unwrap();
        assert_eq!(verbose["calculation_steps"][0], "Lambda cost (monthly): 1.5 USD");
    }
}
