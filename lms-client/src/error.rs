//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Payload rejected locally before any request was sent
    #[error("Invalid request: {0}")]
    Rejected(#[from] ValidationError),

    /// No session token, or the server refused it
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// The server no longer recognises the session's user; the session was cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A newer request for the same store replaced this one
    #[error("Superseded: {0}")]
    Superseded(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Local file access (session store, uploads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the caller has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::SessionExpired(_))
    }

    /// Whether the error came from the transport rather than the server's answer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
