//! Authentication endpoints

use shared::Validate;
use shared::client::{AuthResponse, LoginRequest, RegisterRequest};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

/// `/auth/*`
#[derive(Debug, Clone)]
pub struct AuthApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token.
    ///
    /// Does not touch the session; [`crate::AdminClient::login`] does that.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        req.validate()?;
        self.http.post("/auth/login", &req).await
    }

    /// Register a teacher account, then log in with the same credentials.
    ///
    /// The register endpoint does not hand out a token.
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
        req.validate()?;
        let _: serde_json::Value = self.http.post("/auth/register", req).await?;
        self.login(&req.email, &req.password).await
    }
}
