// lms-client/src/client/http.rs
// HTTP transport for the admin API

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;

/// Server messages meaning "the token belongs to a user that no longer exists"
const STALE_USER_MARKERS: [&str; 3] = ["Teacher with ID", "User with ID", "User not found"];

/// A file sent as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field: String,
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Config(format!("not a file path: {}", path.display())))?
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn upload<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        file: FileUpload,
    ) -> ClientResult<T>;
    fn session(&self) -> &SessionContext;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL without the trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, path: &str, req: RequestBuilder) -> ClientResult<T> {
        tracing::debug!(method, path, "API request");
        let response = self.authorize(req).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(body) if !body.message.is_empty() => body.message,
                _ => text,
            };
            return Err(self.map_error(status, message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn map_error(&self, status: StatusCode, message: String) -> ClientError {
        if is_session_rejection(status, &message) {
            tracing::warn!(status = status.as_u16(), %message, "Server rejected the session, clearing it");
            self.session.clear();
            return ClientError::SessionExpired(message);
        }
        match status {
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// 401, or 400/404 naming a user the server no longer knows
fn is_session_rejection(status: StatusCode, message: &str) -> bool {
    match status {
        StatusCode::UNAUTHORIZED => true,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            STALE_USER_MARKERS.iter().any(|m| message.contains(m))
        }
        _ => false,
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        self.send("GET", path, req).await
    }

    async fn post<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send("POST", path, req).await
    }

    async fn patch<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.patch(self.url(path)).json(body);
        self.send("PATCH", path, req).await
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.delete(self.url(path));
        self.send("DELETE", path, req).await
    }

    async fn upload<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        file: FileUpload,
    ) -> ClientResult<T> {
        let size = file.bytes.len();
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ClientError::Config(format!("invalid mime type {mime}: {e}")))?;
        }
        let form = reqwest::multipart::Form::new().part(file.field, part);
        tracing::debug!(path, file = %file.file_name, size, "Uploading material");
        // Content-Type (with boundary) is set by reqwest
        let req = self.client.post(self.url(path)).multipart(form);
        self.send("POST", path, req).await
    }

    fn session(&self) -> &SessionContext {
        &self.session
    }
}
