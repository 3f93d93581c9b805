//! Transient notification model.
//!
//! # Responsibility
//! - Define producer drafts and active notification records.
//! - Own TTL defaults shared by all producers.
//!
//! # Invariants
//! - An active notification always carries a concrete TTL.
//! - `ttl_ms <= 0` means "persist until dismissed".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an active notification.
pub type NotificationId = Uuid;

/// TTL applied when a producer does not supply one.
pub const DEFAULT_TTL_MS: i64 = 5_000;
/// TTL used for scored quiz result notifications.
pub const QUIZ_RESULT_TTL_MS: i64 = 8_000;

/// Severity class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Toast style class.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Success => "bg-green-50 border-green-500 text-green-800",
            Self::Warning => "bg-yellow-50 border-yellow-500 text-yellow-800",
            Self::Error => "bg-red-50 border-red-500 text-red-800",
            Self::Info => "bg-blue-50 border-blue-500 text-blue-800",
        }
    }
}

/// Producer input for `NotificationCenter::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// `None` falls back to [`DEFAULT_TTL_MS`].
    pub ttl_ms: Option<i64>,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            ttl_ms: None,
        }
    }

    pub fn with_ttl(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = Some(ttl_ms);
        self
    }
}

/// Active notification owned by the notification center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub ttl_ms: i64,
}

impl Notification {
    pub(crate) fn from_draft(id: NotificationId, draft: NotificationDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            ttl_ms: draft.ttl_ms.unwrap_or(DEFAULT_TTL_MS),
        }
    }

    /// Whether this notification stays until dismissed.
    pub fn is_sticky(&self) -> bool {
        self.ttl_ms <= 0
    }
}

/// Rounded percentage `round(100 * score / total)`; `0` when `total == 0`.
pub fn score_percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
