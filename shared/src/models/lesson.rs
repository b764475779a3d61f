//! Lesson Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ordering::Ordered;
use crate::validation::{Validate, ValidationResult, require, require_if_present};

/// Kind of material attached to a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Presentation,
    Video,
    LectureMaterial,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presentation => "PRESENTATION",
            Self::Video => "VIDEO",
            Self::LectureMaterial => "LECTURE_MATERIAL",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lesson entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub module_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub material_type: MaterialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_url: Option<String>,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

impl Ordered for Lesson {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> &str {
        &self.module_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Create lesson payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub material_type: MaterialType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Validate for LessonCreate {
    fn validate(&self) -> ValidationResult {
        require("title", &self.title)
    }
}

/// Update lesson payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_type: Option<MaterialType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Validate for LessonUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("title", self.title.as_deref())
    }
}

/// `{ message, lesson }` returned by create/update/reorder/upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonMutation {
    pub message: String,
    pub lesson: Lesson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_type_uses_screaming_case() {
        let json = serde_json::to_string(&MaterialType::LectureMaterial).unwrap();
        assert_eq!(json, "\"LECTURE_MATERIAL\"");
        let parsed: MaterialType = serde_json::from_str("\"VIDEO\"").unwrap();
        assert_eq!(parsed, MaterialType::Video);
    }

    #[test]
    fn unknown_material_type_is_rejected() {
        assert!(serde_json::from_str::<MaterialType>("\"PODCAST\"").is_err());
    }
}
