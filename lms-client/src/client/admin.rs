//! The admin client facade.
//!
//! [`AdminClient`] ties the transport, the session and its on-disk store
//! together. Every typed API and ordered store it hands out shares the
//! same transport and therefore the same session.

use shared::client::{AuthResponse, RegisterRequest, User};

use crate::api::{
    AuthApi, CategoriesApi, CoursesApi, DashboardApi, LessonsApi, ModulesApi, PracticesApi,
    QuizzesApi,
};
use crate::error::{ClientError, ClientResult};
use crate::session::{SessionContext, SessionStore};
use crate::store::OrderedStore;

use super::http::{HttpClient, NetworkHttpClient};

/// Client for the LMS admin API.
///
/// # Example
///
/// ```no_run
/// use lms_client::ClientConfig;
///
/// # async fn example() -> Result<(), lms_client::ClientError> {
/// let client = ClientConfig::from_env().build_client()?;
/// client.login("teacher@example.com", "secret").await?;
///
/// let modules = client.module_store();
/// modules.open("course-1".to_string()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AdminClient<C = NetworkHttpClient> {
    http: C,
    session: SessionContext,
    store: Option<SessionStore>,
}

// ============================================================================
// Session lifecycle
// ============================================================================

impl<C: HttpClient + Clone + 'static> AdminClient<C> {
    /// `session` must be the context the transport was built with.
    pub fn new(http: C, session: SessionContext, store: Option<SessionStore>) -> Self {
        Self {
            http,
            session,
            store,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Logged-in user, or `Unauthorized` when there is none
    pub fn current_user(&self) -> ClientResult<User> {
        self.session
            .user()
            .ok_or_else(|| ClientError::Unauthorized("not logged in".to_string()))
    }

    /// Log in and persist the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let auth = self.auth().login(email, password).await?;
        self.start_session(auth)
    }

    /// Register a teacher account and log in as it
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<User> {
        let auth = self.auth().register(req).await?;
        self.start_session(auth)
    }

    /// Clear the session and delete its file
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear();
        if let Some(store) = &self.store {
            store.delete()?;
        }
        tracing::info!("Logged out");
        Ok(())
    }

    /// Write the current session to disk; no-op without a session file
    pub fn persist_session(&self) -> ClientResult<()> {
        if let Some(store) = &self.store {
            store.save(&self.session.snapshot())?;
            tracing::debug!(path = %store.path().display(), "Session saved");
        }
        Ok(())
    }

    fn start_session(&self, auth: AuthResponse) -> ClientResult<User> {
        tracing::info!(user_id = %auth.user.id, role = %auth.user.role, "Logged in");
        self.session.set_login(auth.token, auth.user.clone());
        self.persist_session()?;
        Ok(auth.user)
    }
}

// ============================================================================
// Resource APIs
// ============================================================================

impl<C: HttpClient + Clone + 'static> AdminClient<C> {
    pub fn auth(&self) -> AuthApi<C> {
        AuthApi::new(self.http.clone())
    }

    pub fn categories(&self) -> CategoriesApi<C> {
        CategoriesApi::new(self.http.clone())
    }

    pub fn courses(&self) -> CoursesApi<C> {
        CoursesApi::new(self.http.clone())
    }

    pub fn modules(&self) -> ModulesApi<C> {
        ModulesApi::new(self.http.clone())
    }

    pub fn lessons(&self) -> LessonsApi<C> {
        LessonsApi::new(self.http.clone())
    }

    pub fn practices(&self) -> PracticesApi<C> {
        PracticesApi::new(self.http.clone())
    }

    pub fn quizzes(&self) -> QuizzesApi<C> {
        QuizzesApi::new(self.http.clone())
    }

    pub fn dashboard(&self) -> DashboardApi<C> {
        DashboardApi::new(self.http.clone())
    }

    /// A fresh, empty store for one course's modules
    pub fn module_store(&self) -> OrderedStore<ModulesApi<C>> {
        OrderedStore::new(self.modules())
    }

    /// A fresh, empty store for one module's lessons
    pub fn lesson_store(&self) -> OrderedStore<LessonsApi<C>> {
        OrderedStore::new(self.lessons())
    }
}
