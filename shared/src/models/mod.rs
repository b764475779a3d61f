//! Data models
//!
//! Mirrors the admin REST API. All ids are opaque strings assigned by the
//! server; timestamps are RFC 3339.

pub mod category;
pub mod course;
pub mod course_module;
pub mod dashboard;
pub mod lesson;
pub mod practice;
pub mod quiz;

// Re-exports
pub use category::*;
pub use course::*;
pub use course_module::*;
pub use dashboard::*;
pub use lesson::*;
pub use practice::*;
pub use quiz::*;
