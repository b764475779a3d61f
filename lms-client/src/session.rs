//! Session context and its on-disk store
//!
//! The session is an explicitly owned handle: whoever builds the client
//! creates it, loads it from disk on start-up, and clears it on logout.
//! The HTTP layer holds a clone so it can attach the bearer token and
//! invalidate the session when the server rejects the user.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::client::User;

/// Session data persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Bearer token for the admin API
    pub token: Option<String>,
    /// Logged-in user
    pub user: Option<User>,
}

impl SessionData {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Shared, cloneable handle to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionData>>,
}

impl SessionContext {
    /// Creates an empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    /// Copy of the current state, for persisting
    pub fn snapshot(&self) -> SessionData {
        self.inner.read().clone()
    }

    /// Sets the token and user after a successful login.
    pub fn set_login(&self, token: String, user: User) {
        let mut data = self.inner.write();
        data.token = Some(token);
        data.user = Some(user);
    }

    /// Sets only the token (configured token, no user record yet).
    pub fn set_token(&self, token: String) {
        self.inner.write().token = Some(token);
    }

    /// Clears the session on logout or rejection.
    pub fn clear(&self) {
        let mut data = self.inner.write();
        data.token = None;
        data.user = None;
    }
}

/// JSON file holding the session between runs
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored session; a missing or unreadable file means logged out
    pub fn load(&self) -> SessionData {
        if !self.path.exists() {
            return SessionData::default();
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                SessionData::default()
            }
        }
    }

    pub fn save(&self, data: &SessionData) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
