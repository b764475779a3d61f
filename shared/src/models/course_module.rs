//! Course module Model
//!
//! A module is an ordered chapter of a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Lesson;
use crate::ordering::Ordered;
use crate::validation::{Validate, ValidationResult, require, require_if_present};

/// Module entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ModuleCount>,
    /// Embedded lessons, only on the detail endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<Lesson>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCount {
    pub lessons: u32,
}

impl Ordered for CourseModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> &str {
        &self.course_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Create module payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Omitted means "append at the end"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Validate for ModuleCreate {
    fn validate(&self) -> ValidationResult {
        require("title", &self.title)
    }
}

/// Update module payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Validate for ModuleUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("title", self.title.as_deref())
    }
}

/// `{ message, module }` returned by create/update/reorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMutation {
    pub message: String,
    pub module: CourseModule,
}

/// Delete summary; lessons are removed with the module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDeleted {
    pub message: String,
    #[serde(rename = "deletedLessons", default)]
    pub deleted_lessons: u32,
}
