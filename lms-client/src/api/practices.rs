//! Coding practice endpoints

use shared::Validate;
use shared::models::{Practice, PracticeCreate, PracticeUpdate};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

/// `/practices`
#[derive(Debug, Clone)]
pub struct PracticesApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> PracticesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// All practices attached to a lesson
    pub async fn list_for_lesson(&self, lesson_id: &str) -> ClientResult<Vec<Practice>> {
        self.http.get(&format!("/practices/lesson/{lesson_id}")).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Practice> {
        self.http.get(&format!("/practices/{id}")).await
    }

    pub async fn create(&self, lesson_id: &str, data: &PracticeCreate) -> ClientResult<Practice> {
        data.validate()?;
        self.http
            .post(&format!("/practices/lesson/{lesson_id}"), data)
            .await
    }

    pub async fn update(&self, id: &str, data: &PracticeUpdate) -> ClientResult<Practice> {
        data.validate()?;
        self.http.patch(&format!("/practices/{id}"), data).await
    }

    /// Delete a practice; the server echoes the removed record
    pub async fn delete(&self, id: &str) -> ClientResult<Practice> {
        self.http.delete(&format!("/practices/{id}")).await
    }
}
