//! Course module endpoints
//!
//! Modules are ranked inside their course, so besides CRUD this exposes
//! the reorder endpoint and implements [`ScopedCollection`] for
//! [`crate::store::ModuleStore`].

use async_trait::async_trait;
use shared::models::{CourseModule, ModuleCreate, ModuleDeleted, ModuleMutation, ModuleUpdate};
use shared::{ReorderRequest, Validate};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;
use crate::store::ScopedCollection;

fn modules_path(course_id: &str) -> String {
    format!("/admin/courses/{course_id}/modules")
}

/// `/admin/courses/{course}/modules`
#[derive(Debug, Clone)]
pub struct ModulesApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> ModulesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self, course_id: &str) -> ClientResult<Vec<CourseModule>> {
        self.http.get(&modules_path(course_id)).await
    }

    pub async fn get(&self, course_id: &str, id: &str) -> ClientResult<CourseModule> {
        self.http
            .get(&format!("{}/{id}", modules_path(course_id)))
            .await
    }

    pub async fn create(&self, course_id: &str, data: &ModuleCreate) -> ClientResult<CourseModule> {
        data.validate()?;
        let resp: ModuleMutation = self.http.post(&modules_path(course_id), data).await?;
        Ok(resp.module)
    }

    pub async fn update(
        &self,
        course_id: &str,
        id: &str,
        data: &ModuleUpdate,
    ) -> ClientResult<CourseModule> {
        data.validate()?;
        let resp: ModuleMutation = self
            .http
            .patch(&format!("{}/{id}", modules_path(course_id)), data)
            .await?;
        Ok(resp.module)
    }

    /// Delete a module together with its lessons
    pub async fn delete(&self, course_id: &str, id: &str) -> ClientResult<ModuleDeleted> {
        self.http
            .delete(&format!("{}/{id}", modules_path(course_id)))
            .await
    }

    /// Move a module to `position`; the server shifts its siblings
    pub async fn reorder(&self, course_id: &str, id: &str, position: u32) -> ClientResult<CourseModule> {
        let resp: ModuleMutation = self
            .http
            .patch(
                &format!("{}/{id}/reorder", modules_path(course_id)),
                &ReorderRequest { position },
            )
            .await?;
        Ok(resp.module)
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ScopedCollection for ModulesApi<C> {
    /// Course id
    type Scope = String;
    type Entity = CourseModule;
    type Create = ModuleCreate;
    type Update = ModuleUpdate;

    async fn list(&self, scope: &String) -> ClientResult<Vec<CourseModule>> {
        ModulesApi::list(self, scope).await
    }

    async fn create(&self, scope: &String, data: &ModuleCreate) -> ClientResult<CourseModule> {
        ModulesApi::create(self, scope, data).await
    }

    async fn update(&self, scope: &String, id: &str, data: &ModuleUpdate) -> ClientResult<CourseModule> {
        ModulesApi::update(self, scope, id, data).await
    }

    async fn delete(&self, scope: &String, id: &str) -> ClientResult<()> {
        let resp = ModulesApi::delete(self, scope, id).await?;
        tracing::debug!(module_id = id, deleted_lessons = resp.deleted_lessons, "Module deleted");
        Ok(())
    }

    async fn reorder(&self, scope: &String, id: &str, position: u32) -> ClientResult<CourseModule> {
        ModulesApi::reorder(self, scope, id, position).await
    }
}
