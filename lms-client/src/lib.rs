//! LMS admin client
//!
//! Typed access to the LMS admin REST API plus client-side ordered stores
//! for course modules and lessons.
//!
//! - [`AdminClient`]: facade owning the transport and the session
//! - [`api`]: one client per resource (categories, courses, modules, ...)
//! - [`store`]: cached, position-ordered lists with optimistic reordering
//! - [`session`]: the session handle and its JSON file

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use client::{AdminClient, FileUpload, HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{SessionContext, SessionData, SessionStore};
pub use store::{
    LessonStore, ModuleStore, OrderedStore, ReorderError, ReorderOutcome, ScopedCollection,
    StoreStatus,
};

// Re-export shared types for convenience
pub use api::LessonScope;
pub use shared::client::{AuthResponse, User};
