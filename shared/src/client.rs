//! Auth-related types shared by the client and its session store
//!
//! Login and registration DTOs plus the user record the server returns.

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationResult, require};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> ValidationResult {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// Registration request.
///
/// Only teachers self-register; the server checks `secretKey`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(rename = "secretKey")]
    pub secret_key: String,
}

impl RegisterRequest {
    pub fn teacher(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
            email: email.into(),
            password: password.into(),
            role: "teacher".to_string(),
            secret_key: secret_key.into(),
        }
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> ValidationResult {
        require("first_name", &self.first_name)?;
        require("surname", &self.surname)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("secretKey", &self.secret_key)
    }
}

/// Login / register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
}
