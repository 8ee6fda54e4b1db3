use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Invalid unit: {message}")]
    InvalidUnit { message: String },

    #[error("Invalid architecture: {message}")]
    InvalidArchitecture { message: String },

    #[error("Unknown region: '{region}'")]
    UnknownRegion { region: String },

    #[error("Malformed pricing table: {message}")]
    MalformedPricingTable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_unit(message: impl Into<String>) -> Self {
        Self::InvalidUnit {
            message: message.into(),
        }
    }

    pub fn invalid_architecture(message: impl Into<String>) -> Self {
        Self::InvalidArchitecture {
            message: message.into(),
        }
    }

    pub fn unknown_region(region: impl Into<String>) -> Self {
        Self::UnknownRegion {
            region: region.into(),
        }
    }

    pub fn malformed_pricing(message: impl Into<String>) -> Self {
        Self::MalformedPricingTable {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than the pricing data
    /// or the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUnit { .. }
                | Self::InvalidArchitecture { .. }
                | Self::UnknownRegion { .. }
                | Self::Validation { .. }
        )
    }
}
