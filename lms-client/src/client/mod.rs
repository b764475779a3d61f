//! Client module
//!
//! [`AdminClient`] owns the HTTP transport and the session, and hands out
//! typed API clients and ordered stores that share both.

mod admin;
pub mod http;

pub use admin::AdminClient;
pub use http::{FileUpload, HttpClient, NetworkHttpClient};
