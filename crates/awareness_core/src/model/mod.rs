//! Data contracts shared by quiz, notification and page state objects.
//!
//! # Responsibility
//! - Define the immutable records handed to engines and cards.
//! - Keep wire naming (`serde`) in one place for persisted/loaded shapes.
//!
//! # Invariants
//! - Questions and issue summaries are never mutated after being supplied.
//! - Persisted shapes (`QuizHistoryEntry`) stay backward compatible.

pub mod article;
pub mod contact;
pub mod history;
pub mod issue;
pub mod notification;
pub mod question;
