//! Lesson endpoints
//!
//! Lessons are ranked inside their module. Material files go up as
//! multipart uploads.

use async_trait::async_trait;
use shared::models::{Lesson, LessonCreate, LessonMutation, LessonUpdate};
use shared::response::MessageResponse;
use shared::{ReorderRequest, Validate};

use crate::client::{FileUpload, HttpClient, NetworkHttpClient};
use crate::error::ClientResult;
use crate::store::ScopedCollection;

/// Parent scope of a lesson list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonScope {
    pub course_id: String,
    pub module_id: String,
}

impl LessonScope {
    pub fn new(course_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            module_id: module_id.into(),
        }
    }

    fn path(&self) -> String {
        format!(
            "/admin/courses/{}/modules/{}/lessons",
            self.course_id, self.module_id
        )
    }
}

/// `/admin/courses/{course}/modules/{module}/lessons`
#[derive(Debug, Clone)]
pub struct LessonsApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> LessonsApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self, scope: &LessonScope) -> ClientResult<Vec<Lesson>> {
        self.http.get(&scope.path()).await
    }

    pub async fn get(&self, scope: &LessonScope, id: &str) -> ClientResult<Lesson> {
        self.http.get(&format!("{}/{id}", scope.path())).await
    }

    pub async fn create(&self, scope: &LessonScope, data: &LessonCreate) -> ClientResult<Lesson> {
        data.validate()?;
        let resp: LessonMutation = self.http.post(&scope.path(), data).await?;
        Ok(resp.lesson)
    }

    pub async fn update(&self, scope: &LessonScope, id: &str, data: &LessonUpdate) -> ClientResult<Lesson> {
        data.validate()?;
        let resp: LessonMutation = self
            .http
            .patch(&format!("{}/{id}", scope.path()), data)
            .await?;
        Ok(resp.lesson)
    }

    pub async fn delete(&self, scope: &LessonScope, id: &str) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("{}/{id}", scope.path())).await
    }

    pub async fn reorder(&self, scope: &LessonScope, id: &str, position: u32) -> ClientResult<Lesson> {
        let resp: LessonMutation = self
            .http
            .patch(
                &format!("{}/{id}/reorder", scope.path()),
                &ReorderRequest { position },
            )
            .await?;
        Ok(resp.lesson)
    }

    /// Attach a material file; the server sets `material_url`
    pub async fn upload_material(
        &self,
        scope: &LessonScope,
        id: &str,
        file: FileUpload,
    ) -> ClientResult<Lesson> {
        let resp: LessonMutation = self
            .http
            .upload(&format!("{}/{id}/material", scope.path()), file)
            .await?;
        Ok(resp.lesson)
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ScopedCollection for LessonsApi<C> {
    type Scope = LessonScope;
    type Entity = Lesson;
    type Create = LessonCreate;
    type Update = LessonUpdate;

    async fn list(&self, scope: &LessonScope) -> ClientResult<Vec<Lesson>> {
        LessonsApi::list(self, scope).await
    }

    async fn create(&self, scope: &LessonScope, data: &LessonCreate) -> ClientResult<Lesson> {
        LessonsApi::create(self, scope, data).await
    }

    async fn update(&self, scope: &LessonScope, id: &str, data: &LessonUpdate) -> ClientResult<Lesson> {
        LessonsApi::update(self, scope, id, data).await
    }

    async fn delete(&self, scope: &LessonScope, id: &str) -> ClientResult<()> {
        LessonsApi::delete(self, scope, id).await?;
        Ok(())
    }

    async fn reorder(&self, scope: &LessonScope, id: &str, position: u32) -> ClientResult<Lesson> {
        LessonsApi::reorder(self, scope, id, position).await
    }
}
