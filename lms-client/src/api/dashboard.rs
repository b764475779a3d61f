//! Dashboard statistics endpoints

use shared::DataEnvelope;
use shared::models::{CourseStats, DashboardStats, DetailedCourseStats};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

/// `/admin/dashboard`
#[derive(Debug, Clone)]
pub struct DashboardApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> DashboardApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        let resp: DataEnvelope<DashboardStats> = self.http.get("/admin/dashboard/stats").await?;
        Ok(resp.into_inner())
    }

    pub async fn courses(&self) -> ClientResult<Vec<CourseStats>> {
        let resp: DataEnvelope<Vec<CourseStats>> = self.http.get("/admin/dashboard/courses").await?;
        Ok(resp.into_inner())
    }

    pub async fn course(&self, id: &str) -> ClientResult<DetailedCourseStats> {
        let resp: DataEnvelope<DetailedCourseStats> = self
            .http
            .get(&format!("/admin/dashboard/courses/{id}/stats"))
            .await?;
        Ok(resp.into_inner())
    }
}
