//! Quiz question model.
//!
//! # Responsibility
//! - Define the immutable question record consumed by the quiz engine.
//! - Validate question shape before an engine accepts it.
//!
//! # Invariants
//! - `options.len() >= 2`.
//! - `correct_answer < options.len()`.
//! - `id` is non-empty.

use crate::model::issue::IssueSummary;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum number of answer options per question.
pub const MIN_OPTIONS: usize = 2;

/// One multiple-choice question with its related issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Serialized as `question` to match the content files.
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub related_issue: IssueSummary,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        related_issue: IssueSummary,
    ) -> Result<Self, QuestionValidationError> {
        let question = Self {
            id: id.into(),
            prompt: prompt.into(),
            options,
            correct_answer,
            related_issue,
        };
        question.validate()?;
        Ok(question)
    }

    /// Validates question shape.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `TooFewOptions` when fewer than two options exist.
    /// - `CorrectAnswerOutOfRange` when the answer index has no option.
    pub fn validate(&self) -> Result<(), QuestionValidationError> {
        if self.id.trim().is_empty() {
            return Err(QuestionValidationError::EmptyId);
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionValidationError::TooFewOptions {
                id: self.id.clone(),
                count: self.options.len(),
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(QuestionValidationError::CorrectAnswerOutOfRange {
                id: self.id.clone(),
                index: self.correct_answer,
                options: self.options.len(),
            });
        }
        Ok(())
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }

    /// Letter shown before an option (`A.`, `B.`, ...).
    pub fn option_letter(option: usize) -> char {
        u8::try_from(option)
            .ok()
            .and_then(|offset| b'A'.checked_add(offset))
            .map_or('?', char::from)
    }
}

/// Question shape violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    EmptyId,
    TooFewOptions {
        id: String,
        count: usize,
    },
    CorrectAnswerOutOfRange {
        id: String,
        index: usize,
        options: usize,
    },
}

impl Display for QuestionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "question id must not be empty"),
            Self::TooFewOptions { id, count } => write!(
                f,
                "question `{id}` has {count} option(s); at least {MIN_OPTIONS} required"
            ),
            Self::CorrectAnswerOutOfRange { id, index, options } => write!(
                f,
                "question `{id}` correct answer {index} is out of range for {options} option(s)"
            ),
        }
    }
}

impl Error for QuestionValidationError {}

#[cfg(test)]
mod tests {
    use super::{Question, QuestionValidationError};
    use crate::model::issue::{IssueSummary, Severity};

    fn issue() -> IssueSummary {
        IssueSummary::new("Бездомність", "опис", "Соціальна політика", Severity::High)
    }

    fn options(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("option {index}")).collect()
    }

    #[test]
    fn new_accepts_well_formed_question() {
        let question = Question::new("q1", "Питання?", options(4), 2, issue())
            .expect("question should be valid");
        assert!(question.is_correct(2));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn validate_reports_shape_violations() {
        assert_eq!(
            Question::new(" ", "?", options(2), 0, issue()).expect_err("blank id"),
            QuestionValidationError::EmptyId
        );
        assert_eq!(
            Question::new("q", "?", options(1), 0, issue()).expect_err("one option"),
            QuestionValidationError::TooFewOptions {
                id: "q".to_string(),
                count: 1
            }
        );
        let err = Question::new("q", "?", options(3), 3, issue()).expect_err("index 3 of 3");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn option_letters_start_at_a() {
        assert_eq!(Question::option_letter(0), 'A');
        assert_eq!(Question::option_letter(3), 'D');
        assert_eq!(Question::option_letter(500), '?');
    }

    #[test]
    fn prompt_serializes_as_question_field() {
        let question =
            Question::new("q1", "Що таке?", options(2), 1, issue()).expect("valid question");
        let json = serde_json::to_value(&question).expect("serialize question");
        assert_eq!(json["question"], "Що таке?");
        assert_eq!(json["correctAnswer"], 1);
        assert_eq!(json["relatedIssue"]["severity"], "high");
    }
}
