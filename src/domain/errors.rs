//! Domain error types
//!
//! This module defines the error hierarchy for Cohort. All errors are
//! domain-specific and don't expose third-party types; messages are
//! pre-formatted for direct display to a user.

use thiserror::Error;

/// Main Cohort error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CohortError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors reaching or interpreting the calculation service
    #[error("{0}")]
    Calculation(#[from] CalculationError),

    /// Model conversion errors (legacy -> canonical)
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup of an unknown population set key
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Calculation-service-specific errors
///
/// Errors that occur when calling the external calculation service.
/// The display strings are the user-facing wording; callers surface them
/// verbatim. No retry is attempted at this layer.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Transport or protocol failure during the REST call
    #[error("Problem with the rest call to the calculation service: {0}")]
    RestCall(String),

    /// Response body was not parseable as the expected structure
    #[error("Problem with the response from the calculation service: {0}")]
    ResponseFormat(String),
}

impl CalculationError {
    /// Fixed error for a connection actively refused (nothing listening).
    pub fn connection_refused() -> Self {
        CalculationError::RestCall(
            "Server refused connection on that port. Is the service running?".to_string(),
        )
    }

    /// Fixed error for a response body that failed JSON parsing.
    pub fn json_parse() -> Self {
        CalculationError::ResponseFormat("JSON parse error".to_string())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CohortError {
    fn from(err: std::io::Error) -> Self {
        CohortError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CohortError {
    fn from(err: serde_json::Error) -> Self {
        CohortError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CohortError {
    fn from(err: toml::de::Error) -> Self {
        CohortError::Configuration(format!("TOML parse error: {err}"))
    }
}
