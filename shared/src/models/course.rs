//! Course Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;
use crate::validation::{Validate, ValidationResult, require, require_if_present};

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,

    // -- Relations (populated on the list/detail endpoints) --
    /// Owning category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Category>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CourseCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCount {
    pub modules: u32,
    pub lessons: u32,
    pub enrollments: u32,
    pub reviews: u32,
}

/// Create course payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

impl Validate for CourseCreate {
    fn validate(&self) -> ValidationResult {
        require("title", &self.title)?;
        require("category_id", &self.category_id)
    }
}

/// Update course payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Validate for CourseUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("title", self.title.as_deref())?;
        require_if_present("category_id", self.category_id.as_deref())
    }
}

/// `{ message, course }` returned by create/update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseMutation {
    pub message: String,
    pub course: Course,
}

/// Delete summary; the server cascades into modules and enrollments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDeleted {
    pub message: String,
    #[serde(rename = "deletedModules", default)]
    pub deleted_modules: u32,
    #[serde(rename = "affectedEnrollments", default)]
    pub affected_enrollments: u32,
}
