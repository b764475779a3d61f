//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | LMS_API_URL | http://localhost:3000 | Admin API base URL |
//! | LMS_TIMEOUT_SECS | 30 | Per-request timeout |
//! | LMS_SESSION_FILE | (none) | Where the session is persisted between runs |

use std::path::PathBuf;
use std::time::Duration;

use crate::client::{AdminClient, NetworkHttpClient};
use crate::error::ClientResult;
use crate::session::{SessionContext, SessionStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the admin API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Bearer token to start with, bypassing the session file
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Session file; `None` keeps the session in memory only
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            session_file: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LMS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            token: None,
            timeout: std::env::var("LMS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            session_file: std::env::var("LMS_SESSION_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session to this file
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Build the admin client.
    ///
    /// The session is restored from `session_file` when present; an explicit
    /// `token` overrides whatever was stored.
    pub fn build_client(&self) -> ClientResult<AdminClient> {
        let store = self.session_file.clone().map(SessionStore::new);
        let session = match &store {
            Some(store) => SessionContext::from_data(store.load()),
            None => SessionContext::new(),
        };
        if let Some(token) = &self.token {
            session.set_token(token.clone());
        }

        let http = NetworkHttpClient::new(self, session.clone())?;
        Ok(AdminClient::new(http, session, store))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_setters_override_defaults() {
        let config = ClientConfig::new("http://api.local/")
            .with_token("t")
            .with_timeout(5)
            .with_session_file("/tmp/lms-session.json");
        assert_eq!(config.base_url, "http://api.local/");
        assert_eq!(config.token.as_deref(), Some("t"));
        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
        assert!(config.session_file.is_some());
    }

    #[test]
    fn default_points_at_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn explicit_token_seeds_the_session() {
        let client = ClientConfig::default().with_token("abc").build_client().unwrap();
        assert_eq!(client.session().token().as_deref(), Some("abc"));
    }
}
