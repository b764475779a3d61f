//! Coding practice Model
//!
//! Exercises attached to a lesson: starter code, reference solution and
//! input/output test cases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{Validate, ValidationError, ValidationResult, require, require_if_present};

pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Practice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    pub id: String,
    pub lesson_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub initial_code: Option<String>,
    #[serde(default)]
    pub solution_code: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<PracticeTestCase>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// One input/output pair; values are arbitrary JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeTestCase {
    pub input: Value,
    pub output: Value,
}

/// Parse test cases typed by an operator as a JSON array
pub fn parse_test_cases(json: &str) -> Result<Vec<PracticeTestCase>, ValidationError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed)
        .map_err(|e| ValidationError::Invalid(format!("test_cases must be a JSON array of {{input, output}}: {e}")))
}

/// Create practice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<PracticeTestCase>,
}

impl PracticeCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            language: default_language(),
            initial_code: None,
            solution_code: None,
            expected_output: None,
            test_cases: Vec::new(),
        }
    }

    /// Set test cases from their JSON text form
    pub fn with_test_cases_json(mut self, json: &str) -> Result<Self, ValidationError> {
        self.test_cases = parse_test_cases(json)?;
        Ok(self)
    }
}

impl Validate for PracticeCreate {
    fn validate(&self) -> ValidationResult {
        require("title", &self.title)?;
        require("language", &self.language)
    }
}

/// Update practice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<PracticeTestCase>>,
}

impl Validate for PracticeUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("title", self.title.as_deref())?;
        require_if_present("language", self.language.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_parse_from_operator_json() {
        let dto = PracticeCreate::new("Sum")
            .with_test_cases_json(r#"[{"input":[1,2],"output":3}]"#)
            .unwrap();
        assert_eq!(dto.test_cases.len(), 1);
        assert_eq!(dto.test_cases[0].output, serde_json::json!(3));
        assert_eq!(dto.language, "javascript");
    }

    #[test]
    fn malformed_test_cases_are_rejected() {
        let err = PracticeCreate::new("Sum").with_test_cases_json("[{input:").unwrap_err();
        assert!(matches!(err, ValidationError::Invalid(_)));
    }

    #[test]
    fn blank_test_cases_mean_none() {
        assert!(parse_test_cases("  ").unwrap().is_empty());
    }
}
