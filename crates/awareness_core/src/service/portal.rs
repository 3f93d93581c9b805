//! Notification portal: notification overlay plus the quiz modal.
//!
//! # Responsibility
//! - Own the notification center and its overlay container lease.
//! - Mount a fresh quiz engine while the quiz is visible.
//! - Route quiz completion into a scored notification. The portal registers
//!   itself as the engine's completion callback and publishes queued outcomes
//!   once the engine call returns.
//!
//! # Invariants
//! - The quiz modal is mounted only when visible and questions exist.
//! - Hiding the quiz discards its run; persisted history survives.
//! - The overlay lease always reports the current notification count.
//! - Each completed run publishes exactly one result notification.

use crate::model::notification::{Notification, NotificationDraft, NotificationId};
use crate::model::question::{Question, QuestionValidationError};
use crate::repo::kv_store::KeyValueStore;
use crate::service::notification_center::NotificationCenter;
use crate::service::overlay::{
    OverlayHost, OverlayLease, OverlayPosition, NOTIFICATION_CONTAINER_ID,
};
use crate::service::quiz_engine::{QuizEngine, QuizOutcome, Rejection, Transition};
use crate::timer::Clock;
use log::info;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Heading of the quiz modal.
pub const QUIZ_MODAL_TITLE: &str = "Тест на знання соціальних питань";

pub struct NotificationPortal<S: KeyValueStore + Clone> {
    center: NotificationCenter,
    lease: OverlayLease,
    position: OverlayPosition,
    questions: Vec<Question>,
    show_quiz: bool,
    quiz: Option<QuizEngine<S>>,
    completions: Rc<RefCell<Vec<QuizOutcome>>>,
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore + Clone> NotificationPortal<S> {
    /// Mounts the portal into the shared overlay container.
    ///
    /// # Errors
    /// - Returns the first invalid question; nothing is mounted in that case.
    pub fn mount(
        host: &Arc<OverlayHost>,
        position: OverlayPosition,
        questions: Vec<Question>,
        store: S,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, QuestionValidationError> {
        for question in &questions {
            question.validate()?;
        }

        let lease = host.acquire(NOTIFICATION_CONTAINER_ID);
        info!(
            "event=portal_mount module=portal status=ok position={} questions={}",
            position.as_str(),
            questions.len()
        );
        Ok(Self {
            center: NotificationCenter::new(Arc::clone(&clock)),
            lease,
            position,
            questions,
            show_quiz: false,
            quiz: None,
            completions: Rc::new(RefCell::new(Vec::new())),
            store,
            clock,
        })
    }

    /// Flips quiz visibility, mounting or discarding the engine.
    pub fn toggle_quiz(&mut self) {
        self.set_quiz_visible(!self.show_quiz);
    }

    pub fn set_quiz_visible(&mut self, visible: bool) {
        self.show_quiz = visible;
        if !self.is_quiz_open() {
            self.quiz = None;
            return;
        }
        if self.quiz.is_none() {
            let mut engine = QuizEngine::mount_validated(
                self.questions.clone(),
                self.store.clone(),
                Arc::clone(&self.clock),
            )
            .with_related_issues(true);
            let completions = Rc::clone(&self.completions);
            engine.on_complete(move |outcome| completions.borrow_mut().push(outcome));
            self.quiz = Some(engine);
        }
    }

    /// Whether the modal is rendered: visible and non-empty.
    pub fn is_quiz_open(&self) -> bool {
        self.show_quiz && !self.questions.is_empty()
    }

    pub fn quiz(&self) -> Option<&QuizEngine<S>> {
        self.quiz.as_ref()
    }

    pub fn select_answer(&mut self, option: usize) -> Transition {
        match self.quiz.as_mut() {
            Some(quiz) => quiz.select_answer(option),
            None => Transition::Rejected(Rejection::NoQuestions),
        }
    }

    /// Advances the quiz; completion publishes a result notification.
    pub fn advance(&mut self) -> Transition {
        let transition = match self.quiz.as_mut() {
            Some(quiz) => quiz.advance(),
            None => Transition::Rejected(Rejection::NoQuestions),
        };
        self.publish_completions();
        transition
    }

    pub fn reset_quiz(&mut self) -> Transition {
        match self.quiz.as_mut() {
            Some(quiz) => quiz.reset(),
            None => Transition::Rejected(Rejection::NoQuestions),
        }
    }

    /// Publishes a notification from any other producer.
    pub fn notify(&mut self, draft: NotificationDraft) {
        self.center.add(draft);
        self.sync_overlay();
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        self.center.remove(id);
        self.sync_overlay();
    }

    /// Expires due notifications; returns how many were removed.
    pub fn tick(&mut self) -> usize {
        let removed = self.center.tick();
        if removed > 0 {
            self.sync_overlay();
        }
        removed
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.center.active()
    }

    pub fn center(&self) -> &NotificationCenter {
        &self.center
    }

    pub fn position(&self) -> OverlayPosition {
        self.position
    }

    pub fn container_id(&self) -> &str {
        self.lease.container_id()
    }

    fn publish_completions(&mut self) {
        let outcomes = std::mem::take(&mut *self.completions.borrow_mut());
        if outcomes.is_empty() {
            return;
        }
        for outcome in outcomes {
            self.center.on_quiz_complete(outcome.score, outcome.total);
        }
        self.sync_overlay();
    }

    fn sync_overlay(&self) {
        self.lease.set_attached(self.center.len());
    }
}

impl<S: KeyValueStore + Clone> std::fmt::Debug for NotificationPortal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPortal")
            .field("position", &self.position)
            .field("show_quiz", &self.show_quiz)
            .field("quiz", &self.quiz)
            .field("center", &self.center)
            .finish()
    }
}
