//! Typed clients for each admin API resource
//!
//! Each client validates outgoing payloads, builds the resource path and
//! unwraps the server's response envelope.

pub mod auth;
pub mod categories;
pub mod courses;
pub mod dashboard;
pub mod lessons;
pub mod modules;
pub mod practices;
pub mod quizzes;

pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use courses::CoursesApi;
pub use dashboard::DashboardApi;
pub use lessons::{LessonScope, LessonsApi};
pub use modules::ModulesApi;
pub use practices::PracticesApi;
pub use quizzes::{QuizResultsScope, QuizzesApi};
