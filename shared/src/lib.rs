//! Shared types for the LMS admin client
//!
//! Request/response schemas for every REST resource the admin console
//! talks to, boundary validation for outgoing payloads, and the
//! [`Ordered`] contract used by position-ranked collections.

pub mod client;
pub mod models;
pub mod ordering;
pub mod response;
pub mod validation;

// Re-exports
pub use ordering::{Ordered, ReorderRequest};
pub use response::{ApiErrorBody, DataEnvelope};
pub use serde::{Deserialize, Serialize};
pub use validation::{Validate, ValidationError, ValidationResult};
