//! Quiz progression state machine.
//!
//! # Responsibility
//! - Own one quiz run: current question, pending selection, score, answers.
//! - Persist a history entry and report the outcome when the run completes.
//! - Notify registered listeners about every applied transition.
//!
//! # Invariants
//! - Committed answers are never mutated; `answers.len() == current_index`
//!   while in progress and `== total` once completed.
//! - `current_index < total` at all times for a non-empty quiz.
//! - Completion happens exactly once per run and is terminal until `reset`.
//! - The completion callback receives the score including the final answer.
//! - An empty quiz rejects every transition and never completes.

use crate::model::history::QuizHistoryEntry;
use crate::model::issue::IssueSummary;
use crate::model::notification::score_percentage;
use crate::model::question::{Question, QuestionValidationError};
use crate::repo::history_repo::QuizHistoryLog;
use crate::repo::kv_store::KeyValueStore;
use crate::timer::Clock;
use log::{debug, error, info};
use std::sync::Arc;

/// Number of related issues shown after completion.
pub const RELATED_ISSUES_SHOWN: usize = 2;
/// Placeholder text for a quiz mounted without questions.
pub const PLACEHOLDER_TEXT: &str = "Питання для квізу не завантажені";

/// Coarse engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    /// No questions were supplied.
    Placeholder,
    InProgress,
    Completed,
}

/// Ephemeral state of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRun {
    pub current_index: usize,
    pub selected_answer: Option<usize>,
    pub score: u32,
    /// Committed answers in question order.
    pub answers: Vec<usize>,
    pub completed: bool,
}

/// Final result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total: u32,
}

impl QuizOutcome {
    pub fn percentage(&self) -> u32 {
        score_percentage(self.score, self.total)
    }
}

/// Why a transition request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoQuestions,
    AlreadyCompleted,
    NoSelection,
    OptionOutOfRange { option: usize, options: usize },
}

/// Result of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Completed(QuizOutcome),
    Rejected(Rejection),
}

impl Transition {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Change notification delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    AnswerSelected { question: usize, option: usize },
    Advanced { index: usize },
    Completed(QuizOutcome),
    Reset,
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&QuizEvent)>;
type CompletionCallback = Box<dyn FnMut(QuizOutcome)>;

/// Quiz engine bound to one question list and one history store.
pub struct QuizEngine<S: KeyValueStore> {
    questions: Vec<Question>,
    run: QuizRun,
    history: QuizHistoryLog<S>,
    past_runs: Vec<QuizHistoryEntry>,
    clock: Arc<dyn Clock>,
    show_related_issues: bool,
    on_complete: Option<CompletionCallback>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> QuizEngine<S> {
    /// Mounts an engine and reads the persisted history once.
    ///
    /// # Errors
    /// - Returns the first question that fails `Question::validate()`.
    pub fn mount(
        questions: Vec<Question>,
        store: S,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, QuestionValidationError> {
        for question in &questions {
            question.validate()?;
        }
        Ok(Self::mount_validated(questions, store, clock))
    }

    /// Mounts questions that already passed validation.
    pub(crate) fn mount_validated(questions: Vec<Question>, store: S, clock: Arc<dyn Clock>) -> Self {
        let history = QuizHistoryLog::new(store);
        let past_runs = history.load();
        info!(
            "event=quiz_mount module=quiz status=ok questions={} past_runs={}",
            questions.len(),
            past_runs.len()
        );

        Self {
            questions,
            run: QuizRun::default(),
            history,
            past_runs,
            clock,
            show_related_issues: false,
            on_complete: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Enables the post-completion related issues view.
    pub fn with_related_issues(mut self, show: bool) -> Self {
        self.show_related_issues = show;
        self
    }

    /// Sets the callback invoked once per completed run.
    pub fn on_complete(&mut self, callback: impl FnMut(QuizOutcome) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&QuizEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    /// Sets the pending answer for the current question.
    pub fn select_answer(&mut self, option: usize) -> Transition {
        let question = match self.active_question() {
            Ok(question) => question,
            Err(rejection) => return self.reject("select_answer", rejection),
        };
        let options = question.options.len();
        if option >= options {
            return self.reject("select_answer", Rejection::OptionOutOfRange { option, options });
        }

        self.run.selected_answer = Some(option);
        self.emit(QuizEvent::AnswerSelected {
            question: self.run.current_index,
            option,
        });
        Transition::Applied
    }

    /// Commits the pending answer and moves on or completes the run.
    pub fn advance(&mut self) -> Transition {
        let pending = match self.active_question() {
            Ok(question) => self
                .run
                .selected_answer
                .map(|selected| (selected, question.is_correct(selected))),
            Err(rejection) => return self.reject("advance", rejection),
        };
        let Some((selected, correct)) = pending else {
            return self.reject("advance", Rejection::NoSelection);
        };

        self.run.answers.push(selected);
        if correct {
            self.run.score += 1;
        }

        if self.run.current_index + 1 < self.questions.len() {
            self.run.current_index += 1;
            self.run.selected_answer = None;
            debug!(
                "event=quiz_advance module=quiz status=ok index={} score={}",
                self.run.current_index, self.run.score
            );
            self.emit(QuizEvent::Advanced {
                index: self.run.current_index,
            });
            return Transition::Applied;
        }

        self.run.completed = true;
        let outcome = QuizOutcome {
            score: self.run.score,
            total: self.total(),
        };
        self.record_history(outcome);
        info!(
            "event=quiz_complete module=quiz status=ok score={} total={} percentage={}",
            outcome.score,
            outcome.total,
            outcome.percentage()
        );

        if let Some(callback) = self.on_complete.as_mut() {
            callback(outcome);
        }
        self.emit(QuizEvent::Completed(outcome));
        Transition::Completed(outcome)
    }

    /// Abandons or restarts the run; persisted history is kept.
    pub fn reset(&mut self) -> Transition {
        if self.questions.is_empty() {
            return self.reject("reset", Rejection::NoQuestions);
        }
        self.run = QuizRun::default();
        debug!("event=quiz_reset module=quiz status=ok");
        self.emit(QuizEvent::Reset);
        Transition::Applied
    }

    pub fn status(&self) -> QuizStatus {
        if self.questions.is_empty() {
            QuizStatus::Placeholder
        } else if self.run.completed {
            QuizStatus::Completed
        } else {
            QuizStatus::InProgress
        }
    }

    pub fn run(&self) -> &QuizRun {
        &self.run
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    /// Question awaiting an answer; `None` when empty or completed.
    pub fn current_question(&self) -> Option<&Question> {
        self.active_question().ok()
    }

    /// Fraction of the bar filled while answering, `(index + 1) / total`.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        if self.run.completed {
            return 1.0;
        }
        (self.run.current_index + 1) as f64 / self.questions.len() as f64
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.run.current_index + 1 == self.questions.len()
    }

    pub fn can_advance(&self) -> bool {
        self.status() == QuizStatus::InProgress && self.run.selected_answer.is_some()
    }

    /// Label of the advance button for the current question.
    pub fn advance_label(&self) -> &'static str {
        if self.is_last_question() {
            "Завершити квіз"
        } else {
            "Наступне питання"
        }
    }

    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.run.completed.then(|| QuizOutcome {
            score: self.run.score,
            total: self.total(),
        })
    }

    /// Issues shown under the result card, when enabled and completed.
    pub fn related_issues(&self) -> Vec<&IssueSummary> {
        if !self.show_related_issues || !self.run.completed {
            return Vec::new();
        }
        self.questions
            .iter()
            .take(RELATED_ISSUES_SHOWN)
            .map(|question| &question.related_issue)
            .collect()
    }

    /// History read at mount plus entries appended by this engine.
    pub fn history(&self) -> &[QuizHistoryEntry] {
        &self.past_runs
    }

    fn active_question(&self) -> Result<&Question, Rejection> {
        if self.run.completed {
            return Err(Rejection::AlreadyCompleted);
        }
        self.questions
            .get(self.run.current_index)
            .ok_or(Rejection::NoQuestions)
    }

    fn record_history(&mut self, outcome: QuizOutcome) {
        let entry = QuizHistoryEntry::new(
            outcome.score,
            outcome.total,
            self.clock.today().format("%Y-%m-%d").to_string(),
        );
        match self.history.append(entry.clone()) {
            Ok(_) => self.past_runs.push(entry),
            Err(err) => error!(
                "event=history_append module=quiz status=error error={err}"
            ),
        }
    }

    fn reject(&self, operation: &'static str, rejection: Rejection) -> Transition {
        debug!("event=quiz_{operation} module=quiz status=rejected reason={rejection:?}");
        Transition::Rejected(rejection)
    }

    fn emit(&mut self, event: QuizEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<S: KeyValueStore> std::fmt::Debug for QuizEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizEngine")
            .field("questions", &self.questions.len())
            .field("run", &self.run)
            .field("past_runs", &self.past_runs.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
