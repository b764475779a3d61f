//! Ordered store with optimistic reordering
//!
//! # Reorder flow
//!
//! 1. Validate the move locally; an unknown id or out-of-range index never
//!    reaches the network.
//! 2. Moving onto the same index is a no-op.
//! 3. Apply the move to the cache so it shows immediately.
//! 4. Send it to the server tagged with a fresh [`SequenceToken`].
//! 5. On success, merge the echoed entity if the token is still the
//!    latest; otherwise the response is dropped.
//! 6. On failure, re-fetch the whole list and replace the cache. If that
//!    fails too, restore the pre-move snapshot and mark the cache stale.
//!
//! The state lock is never held across an `.await`.

use parking_lot::Mutex;
use shared::Ordered;
use thiserror::Error;

use super::cache::OrderedCache;
use super::collection::ScopedCollection;
use super::sequence::{RequestKind, ScopeSequencer, SequenceToken};
use crate::api::{LessonsApi, ModulesApi};
use crate::client::NetworkHttpClient;
use crate::error::{ClientError, ClientResult};

pub type ModuleStore<C = NetworkHttpClient> = OrderedStore<ModulesApi<C>>;
pub type LessonStore<C = NetworkHttpClient> = OrderedStore<LessonsApi<C>>;

/// Result of a reorder that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome<T> {
    /// Source equals destination, nothing was sent
    Unchanged,
    /// Server confirmed the move; carries the echoed entity
    Applied(T),
    /// Server confirmed, but a newer request owns the cache now
    Superseded,
}

/// Local rejection of a reorder request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderValidation {
    #[error("no scope is open")]
    NoScope,

    #[error("unknown entity {0}")]
    UnknownEntity(String),

    #[error("destination {destination} out of range for {len} items")]
    OutOfRange { destination: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ReorderError {
    /// Rejected before anything changed
    #[error("invalid reorder: {0}")]
    Validation(#[from] ReorderValidation),

    /// Server refused the move; the cache now mirrors the server listing
    #[error("reorder failed, list reloaded from server: {source}")]
    Resynchronized { source: ClientError },

    /// Server refused the move and the reload failed; the cache was rolled back
    #[error("reorder failed ({reorder}) and reload failed ({resync})")]
    ResyncFailed {
        #[source]
        reorder: ClientError,
        resync: ClientError,
    },
}

impl ReorderError {
    /// Text shown to the user next to the list
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(v) => format!("Cannot move item: {v}"),
            Self::Resynchronized { .. } => {
                "Could not save the new order. The list was reloaded.".to_string()
            }
            Self::ResyncFailed { .. } => {
                "Could not save the new order or reload the list. Showing the previous order."
                    .to_string()
            }
        }
    }

    /// Whether the underlying failure means the user must log in again
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Resynchronized { source } => source.requires_login(),
            Self::ResyncFailed { reorder, resync } => {
                reorder.requires_login() || resync.requires_login()
            }
        }
    }
}

/// Observable store state
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatus<S> {
    pub scope: Option<S>,
    /// A request for this store is in flight
    pub loading: bool,
    /// The cache may disagree with the server
    pub stale: bool,
    pub last_error: Option<String>,
    pub len: usize,
}

struct StoreState<S, T: shared::Ordered> {
    scope: Option<S>,
    cache: OrderedCache<T>,
    sequencer: ScopeSequencer,
    in_flight: usize,
    stale: bool,
    last_error: Option<String>,
}

type State<C> =
    StoreState<<C as ScopedCollection>::Scope, <C as ScopedCollection>::Entity>;

/// Counts one in-flight request; released on drop so cancelled futures
/// do not leave the store loading forever
struct InFlight<'a, C: ScopedCollection> {
    state: &'a Mutex<State<C>>,
}

impl<'a, C: ScopedCollection> InFlight<'a, C> {
    fn start(state: &'a Mutex<State<C>>) -> Self {
        state.lock().in_flight += 1;
        Self { state }
    }
}

impl<C: ScopedCollection> Drop for InFlight<'_, C> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// Cached, ordered children of one parent scope
pub struct OrderedStore<C: ScopedCollection> {
    collection: C,
    state: Mutex<State<C>>,
}

impl<C: ScopedCollection> OrderedStore<C> {
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            state: Mutex::new(StoreState {
                scope: None,
                cache: OrderedCache::new(),
                sequencer: ScopeSequencer::new(),
                in_flight: 0,
                stale: false,
                last_error: None,
            }),
        }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn scope(&self) -> Option<C::Scope> {
        self.state.lock().scope.clone()
    }

    /// Current list in display order
    pub fn snapshot(&self) -> Vec<C::Entity> {
        self.state.lock().cache.items().to_vec()
    }

    pub fn get(&self, id: &str) -> Option<C::Entity> {
        self.state.lock().cache.get(id).cloned()
    }

    pub fn status(&self) -> StoreStatus<C::Scope> {
        let state = self.state.lock();
        StoreStatus {
            scope: state.scope.clone(),
            loading: state.in_flight > 0,
            stale: state.stale,
            last_error: state.last_error.clone(),
            len: state.cache.items().len(),
        }
    }

    /// Switch to `scope` and load its list.
    ///
    /// The cache is emptied right away; late responses for the previous
    /// scope are discarded.
    pub async fn open(&self, scope: C::Scope) -> ClientResult<Vec<C::Entity>> {
        let token = {
            let mut state = self.state.lock();
            state.scope = Some(scope.clone());
            state.cache.clear();
            state.stale = false;
            state.last_error = None;
            state.sequencer.issue(RequestKind::Fetch)
        };
        tracing::debug!(?scope, token = token.value(), "Opening scope");
        self.fetch(scope, token).await
    }

    /// Reload the open scope
    pub async fn refresh(&self) -> ClientResult<Vec<C::Entity>> {
        let (scope, token) = {
            let mut state = self.state.lock();
            let scope = state.scope.clone().ok_or_else(no_scope)?;
            (scope, state.sequencer.issue(RequestKind::Fetch))
        };
        self.fetch(scope, token).await
    }

    /// Forget the open scope and drop anything still in flight for it
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.scope = None;
        state.cache.clear();
        state.stale = false;
        state.last_error = None;
        state.sequencer.issue(RequestKind::Fetch);
    }

    async fn fetch(&self, scope: C::Scope, token: SequenceToken) -> ClientResult<Vec<C::Entity>> {
        let _in_flight = InFlight::<C>::start(&self.state);
        let result = self.collection.list(&scope).await;

        let mut state = self.state.lock();
        if !state.sequencer.is_current(token) {
            tracing::debug!(?scope, token = token.value(), "Dropping superseded listing");
            if state.scope.as_ref() != Some(&scope) {
                return Err(ClientError::Superseded(
                    "another scope was opened while loading".to_string(),
                ));
            }
            // Same scope; the newer request decides what the cache holds
            return Ok(state.cache.items().to_vec());
        }
        match result {
            Ok(items) => {
                state.cache.replace_all(items);
                state.stale = false;
                state.last_error = None;
                Ok(state.cache.items().to_vec())
            }
            Err(e) => {
                tracing::warn!(?scope, error = %e, "Failed to load list");
                state.stale = true;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&self, data: &C::Create) -> ClientResult<C::Entity> {
        let scope = self.require_scope()?;
        let _in_flight = InFlight::<C>::start(&self.state);
        let entity = self.record(self.collection.create(&scope, data).await)?;

        let mut state = self.state.lock();
        if state.scope.as_ref() == Some(&scope) {
            state.cache.insert(entity.clone());
        }
        tracing::info!(id = entity.id(), position = entity.position(), "Created");
        Ok(entity)
    }

    pub async fn update(&self, id: &str, data: &C::Update) -> ClientResult<C::Entity> {
        let scope = self.require_scope()?;
        let _in_flight = InFlight::<C>::start(&self.state);
        let entity = self.record(self.collection.update(&scope, id, data).await)?;

        let mut state = self.state.lock();
        if state.scope.as_ref() == Some(&scope) && !state.cache.replace(entity.clone()) {
            tracing::debug!(id, "Updated entity not cached");
        }
        Ok(entity)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let scope = self.require_scope()?;
        let _in_flight = InFlight::<C>::start(&self.state);
        self.record(self.collection.delete(&scope, id).await)?;

        let mut state = self.state.lock();
        if state.scope.as_ref() == Some(&scope) {
            state.cache.remove(id);
        }
        tracing::info!(id, "Deleted");
        Ok(())
    }

    /// Move `entity_id` to `destination` (zero-based index)
    pub async fn reorder(
        &self,
        entity_id: &str,
        destination: usize,
    ) -> Result<ReorderOutcome<C::Entity>, ReorderError> {
        let (scope, token, snapshot) = {
            let mut state = self.state.lock();
            let scope = state.scope.clone().ok_or(ReorderValidation::NoScope)?;
            let len = state.cache.items().len();
            let source = state
                .cache
                .index_of(entity_id)
                .ok_or_else(|| ReorderValidation::UnknownEntity(entity_id.to_string()))?;
            if destination >= len {
                return Err(ReorderValidation::OutOfRange { destination, len }.into());
            }
            if source == destination {
                return Ok(ReorderOutcome::Unchanged);
            }
            let snapshot = state.cache.items().to_vec();
            state.cache.move_item(source, destination);
            (scope, state.sequencer.issue(RequestKind::Reorder), snapshot)
        };
        tracing::info!(
            id = entity_id,
            destination,
            token = token.value(),
            "Reordering"
        );

        let _in_flight = InFlight::<C>::start(&self.state);
        let cause = match self
            .collection
            .reorder(&scope, entity_id, destination as u32)
            .await
        {
            Ok(entity) => {
                let relist = {
                    let mut state = self.state.lock();
                    if state.sequencer.is_current(token) {
                        state.cache.replace(entity.clone());
                        state.stale = false;
                        state.last_error = None;
                        return Ok(ReorderOutcome::Applied(entity));
                    }
                    tracing::debug!(
                        id = entity_id,
                        token = token.value(),
                        "Dropping superseded reorder response"
                    );
                    // A listing issued after this move may predate it on the server
                    let relist = state.sequencer.latest_kind() == Some(RequestKind::Fetch)
                        && state.scope.as_ref() == Some(&scope);
                    if relist {
                        state.stale = true;
                    }
                    relist
                };
                if relist {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "Reload after superseded reorder failed");
                    }
                }
                return Ok(ReorderOutcome::Superseded);
            }
            Err(e) => e,
        };

        tracing::warn!(id = entity_id, error = %cause, "Reorder rejected, reloading list");
        self.resync(scope, snapshot, cause).await
    }

    async fn resync(
        &self,
        scope: C::Scope,
        snapshot: Vec<C::Entity>,
        cause: ClientError,
    ) -> Result<ReorderOutcome<C::Entity>, ReorderError> {
        let token = {
            let mut state = self.state.lock();
            if state.scope.as_ref() != Some(&scope) {
                // Scope changed meanwhile; its cache is not ours to touch
                return Err(ReorderError::Resynchronized { source: cause });
            }
            state.sequencer.issue(RequestKind::Fetch)
        };

        match self.collection.list(&scope).await {
            Ok(items) => {
                let mut state = self.state.lock();
                if state.sequencer.is_current(token) {
                    state.cache.replace_all(items);
                    state.stale = false;
                }
                state.last_error = Some(cause.to_string());
                Err(ReorderError::Resynchronized { source: cause })
            }
            Err(resync) => {
                tracing::error!(error = %resync, "Reload after failed reorder also failed");
                let mut state = self.state.lock();
                if state.sequencer.is_current(token) {
                    state.cache.replace_all(snapshot);
                    state.stale = true;
                }
                state.last_error = Some(resync.to_string());
                Err(ReorderError::ResyncFailed {
                    reorder: cause,
                    resync,
                })
            }
        }
    }

    fn require_scope(&self) -> ClientResult<C::Scope> {
        self.state.lock().scope.clone().ok_or_else(no_scope)
    }

    /// Note a failed mutation in the status
    fn record<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            self.state.lock().last_error = Some(e.to_string());
        }
        result
    }
}

fn no_scope() -> ClientError {
    ClientError::Internal("no scope is open".to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        scope: String,
        position: u32,
    }

    impl Ordered for Item {
        fn id(&self) -> &str {
            &self.id
        }
        fn parent_id(&self) -> &str {
            &self.scope
        }
        fn position(&self) -> u32 {
            self.position
        }
        fn set_position(&mut self, position: u32) {
            self.position = position;
        }
    }

    /// Server holding id lists per scope; reorders can be made to fail
    #[derive(Default)]
    struct Server {
        lists: Mutex<HashMap<String, Vec<String>>>,
        reject_reorders: Mutex<bool>,
        reject_lists: Mutex<bool>,
        reorder_calls: Mutex<usize>,
    }

    impl Server {
        fn with(scope: &str, ids: &[&str]) -> Self {
            let server = Self::default();
            server.lists.lock().insert(
                scope.to_string(),
                ids.iter().map(|s| s.to_string()).collect(),
            );
            server
        }

        fn items(&self, scope: &str) -> Vec<Item> {
            self.lists
                .lock()
                .get(scope)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(i, id)| Item {
                    id,
                    scope: scope.to_string(),
                    position: i as u32,
                })
                .collect()
        }
    }

    #[async_trait]
    impl ScopedCollection for Server {
        type Scope = String;
        type Entity = Item;
        type Create = String;
        type Update = ();

        async fn list(&self, scope: &String) -> ClientResult<Vec<Item>> {
            if *self.reject_lists.lock() {
                return Err(ClientError::Api {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            Ok(self.items(scope))
        }

        async fn create(&self, scope: &String, id: &String) -> ClientResult<Item> {
            self.lists.lock().entry(scope.clone()).or_default().push(id.clone());
            let items = self.items(scope);
            items
                .into_iter()
                .find(|i| &i.id == id)
                .ok_or_else(|| ClientError::Internal("lost".into()))
        }

        async fn update(&self, scope: &String, id: &str, _: &()) -> ClientResult<Item> {
            self.items(scope)
                .into_iter()
                .find(|i| i.id == id)
                .ok_or_else(|| ClientError::NotFound(id.to_string()))
        }

        async fn delete(&self, scope: &String, id: &str) -> ClientResult<()> {
            if let Some(list) = self.lists.lock().get_mut(scope) {
                list.retain(|i| i != id);
            }
            Ok(())
        }

        async fn reorder(&self, scope: &String, id: &str, position: u32) -> ClientResult<Item> {
            *self.reorder_calls.lock() += 1;
            if *self.reject_reorders.lock() {
                return Err(ClientError::Validation("position rejected".into()));
            }
            {
                let mut lists = self.lists.lock();
                let list = lists.entry(scope.clone()).or_default();
                let from = list
                    .iter()
                    .position(|i| i == id)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
                let moved = list.remove(from);
                list.insert(position as usize, moved);
            }
            Ok(Item {
                id: id.to_string(),
                scope: scope.clone(),
                position,
            })
        }
    }

    fn ids(store: &OrderedStore<Server>) -> Vec<String> {
        store.snapshot().into_iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn validation_never_touches_cache_or_network() {
        let store = OrderedStore::new(Server::with("c1", &["a", "b", "c"]));
        assert!(matches!(
            store.reorder("a", 0).await,
            Err(ReorderError::Validation(ReorderValidation::NoScope))
        ));

        store.open("c1".into()).await.unwrap();
        assert!(matches!(
            store.reorder("zz", 0).await,
            Err(ReorderError::Validation(ReorderValidation::UnknownEntity(_)))
        ));
        assert!(matches!(
            store.reorder("a", 3).await,
            Err(ReorderError::Validation(ReorderValidation::OutOfRange { destination: 3, len: 3 }))
        ));
        assert_eq!(ids(&store), ["a", "b", "c"]);
        assert_eq!(*store.collection().reorder_calls.lock(), 0);
    }

    #[tokio::test]
    async fn same_index_is_unchanged() {
        let store = OrderedStore::new(Server::with("c1", &["a", "b"]));
        store.open("c1".into()).await.unwrap();
        assert_eq!(store.reorder("b", 1).await.unwrap(), ReorderOutcome::Unchanged);
        assert_eq!(*store.collection().reorder_calls.lock(), 0);
    }

    #[tokio::test]
    async fn crud_keeps_cache_in_step() {
        let store = OrderedStore::new(Server::with("c1", &["a", "b"]));
        store.open("c1".into()).await.unwrap();

        store.create(&"c".to_string()).await.unwrap();
        assert_eq!(ids(&store), ["a", "b", "c"]);

        store.delete("a").await.unwrap();
        assert_eq!(ids(&store), ["b", "c"]);

        store.update("c", &()).await.unwrap();
        assert_eq!(ids(&store), ["b", "c"]);

        store.refresh().await.unwrap();
        let positions: Vec<u32> = store.snapshot().iter().map(|i| i.position).collect();
        assert_eq!(positions, [0, 1]);
        assert!(!store.status().loading);
    }

    #[tokio::test]
    async fn failed_reorder_and_failed_reload_roll_back() {
        let store = OrderedStore::new(Server::with("c1", &["a", "b", "c"]));
        store.open("c1".into()).await.unwrap();
        *store.collection().reject_reorders.lock() = true;
        *store.collection().reject_lists.lock() = true;

        let err = store.reorder("a", 2).await.unwrap_err();
        assert!(matches!(err, ReorderError::ResyncFailed { .. }));
        assert!(!err.requires_login());
        assert_eq!(ids(&store), ["a", "b", "c"]);

        let status = store.status();
        assert!(status.stale);
        assert!(status.last_error.is_some());
    }

    #[tokio::test]
    async fn opening_another_scope_replaces_the_list() {
        let server = Server::with("c1", &["a", "b"]);
        server.lists.lock().insert("c2".into(), vec!["x".into()]);
        let store = OrderedStore::new(server);

        store.open("c1".into()).await.unwrap();
        store.open("c2".into()).await.unwrap();
        assert_eq!(ids(&store), ["x"]);
        assert_eq!(store.scope().as_deref(), Some("c2"));

        store.close();
        assert!(store.snapshot().is_empty());
        assert!(store.refresh().await.is_err());
    }
}
