//! Category endpoints

use shared::Validate;
use shared::models::{Category, CategoryCreate, CategoryMutation, CategoryUpdate};
use shared::response::MessageResponse;

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

const BASE: &str = "/admin/categories";

/// `/admin/categories`
#[derive(Debug, Clone)]
pub struct CategoriesApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> CategoriesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        self.http.get(BASE).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Category> {
        self.http.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, data: &CategoryCreate) -> ClientResult<Category> {
        data.validate()?;
        let resp: CategoryMutation = self.http.post(BASE, data).await?;
        Ok(resp.category)
    }

    pub async fn update(&self, id: &str, data: &CategoryUpdate) -> ClientResult<Category> {
        data.validate()?;
        let resp: CategoryMutation = self.http.patch(&format!("{BASE}/{id}"), data).await?;
        Ok(resp.category)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
