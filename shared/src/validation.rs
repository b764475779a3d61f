//! Boundary validation for outgoing payloads
//!
//! Every create/update DTO implements [`Validate`]; API clients call it
//! before anything goes on the wire.

use thiserror::Error;

/// Payload rejected before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// A numeric field is outside its allowed range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A field has the wrong shape (bad JSON, conflicting options, ...)
    #[error("{0}")]
    Invalid(String),
}

pub type ValidationResult = Result<(), ValidationError>;

/// Validation hook for request payloads
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

/// Reject blank strings
pub fn require(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Reject a provided-but-blank optional string (PATCH semantics)
pub fn require_if_present(field: &'static str, value: Option<&str>) -> ValidationResult {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

pub fn require_range(field: &'static str, value: i64, min: i64, max: i64) -> ValidationResult {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}
