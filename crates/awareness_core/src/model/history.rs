//! Persisted quiz history record.

use serde::{Deserialize, Serialize};

/// Storage key holding the JSON-encoded history array.
pub const QUIZ_HISTORY_KEY: &str = "quizHistory";

/// One completed quiz run.
///
/// `date` is the local completion date formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub score: u32,
    pub total: u32,
    pub date: String,
}

impl QuizHistoryEntry {
    pub fn new(score: u32, total: u32, date: impl Into<String>) -> Self {
        Self {
            score,
            total,
            date: date.into(),
        }
    }
}
