//! # Error Types
//!
//! Structured error types for cfee_core. The calculation engine and the
//! reset controller never fail: bad numeric input degrades to zero. Errors
//! only surface at the edges, when a host names a field that does not exist,
//! when a settings file cannot be loaded, or when input is outside the range
//! the form would accept.
//!
//! ## Example
//!
//! ```rust
//! use cfee_core::errors::{CalcError, CalcResult};
//!
//! fn validate_tax(tax_percent: f64) -> CalcResult<()> {
//!     if tax_percent > 100.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "buyingTaxPercent".to_string(),
//!             value: tax_percent.to_string(),
//!             reason: "Tax cannot exceed 100%".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cfee_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for host-facing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its accepted range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The host referred to an input field that does not exist
    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        CalcError::UnknownField { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownField { .. } => "UNKNOWN_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
