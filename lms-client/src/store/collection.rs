use std::fmt::Debug;

use async_trait::async_trait;
use shared::Ordered;

use crate::error::ClientResult;

/// Remote CRUD and reorder endpoints for the children of one parent scope
#[async_trait]
pub trait ScopedCollection: Send + Sync + 'static {
    /// Identifies the parent (course id, or course and module ids)
    type Scope: Clone + Debug + PartialEq + Send + Sync + 'static;
    type Entity: Ordered + Debug;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Authoritative, position-ordered listing
    async fn list(&self, scope: &Self::Scope) -> ClientResult<Vec<Self::Entity>>;

    async fn create(&self, scope: &Self::Scope, data: &Self::Create) -> ClientResult<Self::Entity>;

    async fn update(
        &self,
        scope: &Self::Scope,
        id: &str,
        data: &Self::Update,
    ) -> ClientResult<Self::Entity>;

    async fn delete(&self, scope: &Self::Scope, id: &str) -> ClientResult<()>;

    /// Move one entity to `position`; the server shifts the others
    async fn reorder(
        &self,
        scope: &Self::Scope,
        id: &str,
        position: u32,
    ) -> ClientResult<Self::Entity>;
}
