//! Quiz endpoints
//!
//! The server calls quizzes "tests", hence the `/tests` paths.

use shared::Validate;
use shared::models::{Quiz, QuizCreate, QuizResult, QuizUpdate};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::error::ClientResult;

const BASE: &str = "/tests";

/// Which learners' results to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizResultsScope {
    Module(String),
    Course(String),
}

/// `/tests`
#[derive(Debug, Clone)]
pub struct QuizzesApi<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> QuizzesApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Quiz>> {
        self.http.get(BASE).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Quiz> {
        self.http.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, data: &QuizCreate) -> ClientResult<Quiz> {
        data.validate()?;
        self.http.post(BASE, data).await
    }

    pub async fn update(&self, id: &str, data: &QuizUpdate) -> ClientResult<Quiz> {
        data.validate()?;
        self.http.patch(&format!("{BASE}/{id}"), data).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Quiz> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }

    pub async fn results(&self, scope: &QuizResultsScope) -> ClientResult<Vec<QuizResult>> {
        let path = match scope {
            QuizResultsScope::Module(id) => format!("{BASE}/module/{id}/results"),
            QuizResultsScope::Course(id) => format!("{BASE}/course/{id}/results"),
        };
        self.http.get(&path).await
    }
}
