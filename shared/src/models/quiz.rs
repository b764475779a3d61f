//! Quiz Model
//!
//! The API calls these "tests". A quiz is attached to exactly one of a
//! lesson, a module or a course and holds a nested list of questions,
//! each with its own answer list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    Validate, ValidationError, ValidationResult, require, require_if_present, require_range,
};

/// Quiz entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
    #[serde(default)]
    pub module_id: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    /// 0 shows every question
    #[serde(default)]
    pub questions_to_show: u32,
    /// Percentage needed to pass
    #[serde(default)]
    pub passing_score: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Where the quiz is attached; lesson wins over module wins over course
    pub fn placement(&self) -> Option<QuizPlacement> {
        if let Some(id) = &self.lesson_id {
            return Some(QuizPlacement::Lesson(id.clone()));
        }
        if let Some(id) = &self.module_id {
            return Some(QuizPlacement::Module(id.clone()));
        }
        self.course_id.clone().map(QuizPlacement::Course)
    }
}

/// Attachment point of a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPlacement {
    Lesson(String),
    Module(String),
    Course(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    SingleChoice,
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: None,
            text: text.into(),
            kind,
            answers: Vec::new(),
        }
    }

    pub fn answer(mut self, text: impl Into<String>, is_correct: bool) -> Self {
        self.answers.push(Answer {
            id: None,
            text: text.into(),
            is_correct,
        });
        self
    }

    /// Strip server ids so the question can be resubmitted
    pub fn into_draft(self) -> Self {
        Self {
            id: None,
            answers: self
                .answers
                .into_iter()
                .map(|a| Answer { id: None, ..a })
                .collect(),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

fn validate_questions(questions: &[Question]) -> ValidationResult {
    if questions.is_empty() {
        return Err(ValidationError::Invalid(
            "a quiz needs at least one question".into(),
        ));
    }
    for (index, question) in questions.iter().enumerate() {
        require("question text", &question.text)?;
        if question.answers.is_empty() {
            return Err(ValidationError::Invalid(format!(
                "question {} needs at least one answer",
                index + 1
            )));
        }
        for answer in &question.answers {
            require("answer text", &answer.text)?;
        }
    }
    Ok(())
}

fn count_placements(lesson: &Option<String>, module: &Option<String>, course: &Option<String>) -> usize {
    [lesson, module, course]
        .iter()
        .filter(|id| id.as_deref().is_some_and(|s| !s.trim().is_empty()))
        .count()
}

/// Create quiz payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_to_show: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<u32>,
    pub questions: Vec<Question>,
}

impl QuizCreate {
    pub fn new(title: impl Into<String>, placement: QuizPlacement) -> Self {
        let mut dto = Self {
            title: title.into(),
            description: None,
            lesson_id: None,
            module_id: None,
            course_id: None,
            questions_to_show: None,
            passing_score: None,
            questions: Vec::new(),
        };
        match placement {
            QuizPlacement::Lesson(id) => dto.lesson_id = Some(id),
            QuizPlacement::Module(id) => dto.module_id = Some(id),
            QuizPlacement::Course(id) => dto.course_id = Some(id),
        }
        dto
    }

    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

impl Validate for QuizCreate {
    fn validate(&self) -> ValidationResult {
        require("title", &self.title)?;
        if count_placements(&self.lesson_id, &self.module_id, &self.course_id) != 1 {
            return Err(ValidationError::Invalid(
                "a quiz must be attached to exactly one lesson, module or course".into(),
            ));
        }
        if let Some(score) = self.passing_score {
            require_range("passing_score", score as i64, 0, 100)?;
        }
        validate_questions(&self.questions)
    }
}

/// Update quiz payload; `questions`, when present, replaces the whole list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_to_show: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

impl Validate for QuizUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("title", self.title.as_deref())?;
        if count_placements(&self.lesson_id, &self.module_id, &self.course_id) > 1 {
            return Err(ValidationError::Invalid(
                "a quiz can only be attached to one lesson, module or course".into(),
            ));
        }
        if let Some(score) = self.passing_score {
            require_range("passing_score", score as i64, 0, 100)?;
        }
        match &self.questions {
            Some(questions) => validate_questions(questions),
            None => Ok(()),
        }
    }
}

/// One learner's attempt, as listed by the results endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub user_id: String,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub score: f64,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuizCreate {
        QuizCreate::new("Final", QuizPlacement::Module("m1".into())).question(
            Question::new("2 + 2?", QuestionKind::SingleChoice)
                .answer("4", true)
                .answer("5", false),
        )
    }

    #[test]
    fn valid_quiz_passes() {
        assert!(sample().validate().is_ok());
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["module_id"], "m1");
        assert!(json.get("lesson_id").is_none());
        assert_eq!(json["questions"][0]["type"], "single_choice");
    }

    #[test]
    fn quiz_without_questions_is_rejected() {
        let dto = QuizCreate::new("Final", QuizPlacement::Course("c1".into()));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn question_without_answers_is_rejected() {
        let dto = QuizCreate::new("Final", QuizPlacement::Course("c1".into()))
            .question(Question::new("Why?", QuestionKind::MultipleChoice));
        assert_eq!(
            dto.validate(),
            Err(ValidationError::Invalid("question 1 needs at least one answer".into()))
        );
    }

    #[test]
    fn double_placement_is_rejected() {
        let mut dto = sample();
        dto.course_id = Some("c1".into());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn passing_score_above_hundred_is_rejected() {
        let mut dto = sample();
        dto.passing_score = Some(120);
        assert!(matches!(
            dto.validate(),
            Err(ValidationError::OutOfRange { field: "passing_score", .. })
        ));
    }

    #[test]
    fn placement_prefers_lesson() {
        let quiz: Quiz = serde_json::from_str(
            r#"{"id":"q","title":"t","lesson_id":"l1","module_id":"m1","course_id":null,
                "questions_to_show":0,"passing_score":60,
                "created_at":"2025-01-01T00:00:00Z","questions":[]}"#,
        )
        .unwrap();
        assert_eq!(quiz.placement(), Some(QuizPlacement::Lesson("l1".into())));
    }

    #[test]
    fn draft_drops_server_ids() {
        let q = Question {
            id: Some("q1".into()),
            text: "x".into(),
            kind: QuestionKind::SingleChoice,
            answers: vec![Answer {
                id: Some("a1".into()),
                text: "y".into(),
                is_correct: true,
            }],
        }
        .into_draft();
        assert!(q.id.is_none());
        assert!(q.answers[0].id.is_none());
    }
}
