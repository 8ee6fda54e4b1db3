//! API request, response and error types

pub mod calculation;
pub mod error;
pub mod json;

pub use calculation::{CalculateRequestBody, CalculateResponse, RegionsResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
