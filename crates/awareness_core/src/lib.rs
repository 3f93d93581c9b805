//! Core logic for the social awareness platform.
//! Quiz progression, notifications, issue cards and page state live here;
//! hosts only render and forward events.

pub mod config;
pub mod content;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timer;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::Article;
pub use model::contact::{
    ContactCategory, ContactField, ContactForm, ContactSubmission, FieldErrors,
};
pub use model::history::{QuizHistoryEntry, QUIZ_HISTORY_KEY};
pub use model::issue::{slugify, IssueSummary, Severity, SlugRegistry};
pub use model::notification::{
    score_percentage, Notification, NotificationDraft, NotificationId, NotificationKind,
};
pub use model::question::{Question, QuestionValidationError};
pub use repo::history_repo::QuizHistoryLog;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use service::articles::{ArticleSource, ArticlesPage, ArticlesView, MockArticleSource};
pub use service::contact::{
    ContactPage, ContactTransport, SimulatedTransport, SubmitStatus, TransportError,
};
pub use service::issue_card::{IssueCard, VisibilityObserver, VisibilitySink};
pub use service::notification_center::{NotificationCenter, NotificationEvent, RemovalCause};
pub use service::overlay::{OverlayHost, OverlayLease, OverlayPosition};
pub use service::portal::NotificationPortal;
pub use service::quiz_engine::{
    QuizEngine, QuizEvent, QuizOutcome, QuizRun, QuizStatus, Rejection, Transition,
};
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
