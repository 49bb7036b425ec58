//! # Error Types
//!
//! Structured error types for dilata_core. Errors serialize to JSON with a
//! `type` discriminator so the CLI can print them next to results.
//!
//! ## Handling policy
//!
//! - `Configuration` is fatal: the binaries refuse to start.
//! - `ExternalService` is recovered: the message replaces the explanation.
//! - Slider and text edits never produce errors; they are clamped instead.
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::errors::{LabError, LabResult};
//!
//! fn validate_length(length_m: f64) -> LabResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(LabError::invalid_input(
//!             "initial_length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dilata_core operations
pub type LabResult<T> = Result<T, LabError>;

/// Structured error type for the expansion lab.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LabError {
    /// Required configuration is missing or malformed (fatal at startup)
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// An input value is invalid (out of range, empty, wrong type)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material key not present in the catalog
    #[error("Material not found: {key}")]
    MaterialNotFound { key: String },

    /// The explanation service failed (network, quota, malformed response)
    #[error("Explanation service error: {reason}")]
    ExternalService { reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl LabError {
    /// Create a Configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        LabError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        LabError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(key: impl Into<String>) -> Self {
        LabError::MaterialNotFound { key: key.into() }
    }

    /// Create an ExternalService error
    pub fn external_service(reason: impl Into<String>) -> Self {
        LabError::ExternalService {
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        LabError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if the session can continue after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LabError::Configuration { .. })
    }

    /// Message shown to the student in place of an explanation
    pub fn user_message(&self) -> String {
        match self {
            LabError::ExternalService { reason } => {
                format!("Error al comunicarse con la IA: {}", reason)
            }
            LabError::InvalidInput { reason, .. } => reason.clone(),
            other => format!("Ocurrió un error inesperado: {}", other),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LabError::Configuration { .. } => "CONFIGURATION",
            LabError::InvalidInput { .. } => "INVALID_INPUT",
            LabError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            LabError::ExternalService { .. } => "EXTERNAL_SERVICE",
            LabError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::configuration(format!("invalid config file: {}", err))
    }
}
