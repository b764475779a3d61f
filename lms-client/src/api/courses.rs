//! Course endpoints

use shared::Validate;
use shared::models::{Course, CourseCreate, CourseDeleted, CourseMutation, CourseUpdate};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

const BASE: &str = "/admin/courses";

/// `/admin/courses`
#[derive(Debug, Clone)]
pub struct CoursesApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> CoursesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Course>> {
        self.http.get(BASE).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Course> {
        self.http.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, data: &CourseCreate) -> ClientResult<Course> {
        data.validate()?;
        let resp: CourseMutation = self.http.post(BASE, data).await?;
        Ok(resp.course)
    }

    pub async fn update(&self, id: &str, data: &CourseUpdate) -> ClientResult<Course> {
        data.validate()?;
        let resp: CourseMutation = self.http.patch(&format!("{BASE}/{id}"), data).await?;
        Ok(resp.course)
    }

    /// Delete a course; modules and enrollments go with it
    pub async fn delete(&self, id: &str) -> ClientResult<CourseDeleted> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
