//! Transient notification set with TTL expiry.
//!
//! # Responsibility
//! - Own the active notifications; producers only submit drafts.
//! - Schedule expiry per notification and cancel it on dismissal.
//! - Turn quiz outcomes into scored result notifications.
//!
//! # Invariants
//! - No two active notifications share an id.
//! - `remove` is idempotent; removing an unknown id is a no-op.
//! - A notification with `ttl_ms <= 0` is never expired by `tick`.
//! - Display order is insertion order.

use crate::model::notification::{
    score_percentage, Notification, NotificationDraft, NotificationId, NotificationKind,
    QUIZ_RESULT_TTL_MS,
};
use crate::timer::{Clock, TimerId, TimerQueue};
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

/// Title used for quiz result notifications.
pub const QUIZ_RESULT_TITLE: &str = "Квіз завершено";

/// Why a notification left the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    Dismissed,
    Expired,
}

/// Change notification delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Added(Notification),
    Removed {
        id: NotificationId,
        cause: RemovalCause,
    },
}

type Listener = Box<dyn FnMut(&NotificationEvent)>;

struct ActiveNotification {
    notification: Notification,
    timer: Option<TimerId>,
}

/// Owner of the active notification set.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    active: Vec<ActiveNotification>,
    timers: TimerQueue<NotificationId>,
    listeners: Vec<Listener>,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            active: Vec::new(),
            timers: TimerQueue::new(),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&NotificationEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Inserts a notification built from `draft` and schedules its expiry.
    pub fn add(&mut self, draft: NotificationDraft) {
        let id = self.fresh_id();
        let notification = Notification::from_draft(id, draft);
        let timer = if notification.is_sticky() {
            None
        } else {
            let ttl = u64::try_from(notification.ttl_ms).unwrap_or(0);
            let deadline = self.clock.now_ms().saturating_add(ttl);
            Some(self.timers.schedule(deadline, id))
        };

        debug!(
            "event=notification_add module=notifications status=ok kind={} ttl_ms={} active={}",
            notification.kind.as_str(),
            notification.ttl_ms,
            self.active.len() + 1
        );
        self.emit(&NotificationEvent::Added(notification.clone()));
        self.active.push(ActiveNotification {
            notification,
            timer,
        });
    }

    /// Dismisses one notification and cancels its pending expiry.
    pub fn remove(&mut self, id: NotificationId) {
        self.remove_with_cause(id, RemovalCause::Dismissed);
    }

    /// Expires every notification whose deadline has passed.
    ///
    /// Returns the number of notifications removed.
    pub fn tick(&mut self) -> usize {
        let due = self.timers.drain_due(self.clock.now_ms());
        let mut removed = 0;
        for id in due {
            if self.remove_with_cause(id, RemovalCause::Expired) {
                removed += 1;
            }
        }
        removed
    }

    /// Publishes a scored result for a completed quiz.
    pub fn on_quiz_complete(&mut self, score: u32, total: u32) {
        let percentage = score_percentage(score, total);
        let (kind, lead) = if percentage >= 80 {
            (NotificationKind::Success, "Відмінний результат!")
        } else if percentage >= 60 {
            (NotificationKind::Warning, "Добрий результат!")
        } else {
            (NotificationKind::Error, "Потрібно попрацювати більше.")
        };
        let message =
            format!("{lead} Ви правильно відповіли на {score} з {total} питань.");

        info!(
            "event=quiz_result_notify module=notifications status=ok kind={} percentage={percentage}",
            kind.as_str()
        );
        self.add(NotificationDraft::new(kind, QUIZ_RESULT_TITLE, message).with_ttl(QUIZ_RESULT_TTL_MS));
    }

    /// Active notifications in display order.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|entry| &entry.notification)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.active()
            .find(|notification| notification.id == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Earliest pending expiry, for hosts that sleep until the next tick.
    pub fn next_expiry_ms(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Number of expiry timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn remove_with_cause(&mut self, id: NotificationId, cause: RemovalCause) -> bool {
        let Some(position) = self
            .active
            .iter()
            .position(|entry| entry.notification.id == id)
        else {
            return false;
        };

        let entry = self.active.remove(position);
        if let Some(timer) = entry.timer {
            // already drained when the removal comes from `tick`
            self.timers.cancel(timer);
        }
        debug!(
            "event=notification_remove module=notifications status=ok cause={cause:?} active={}",
            self.active.len()
        );
        self.emit(&NotificationEvent::Removed { id, cause });
        true
    }

    fn fresh_id(&self) -> NotificationId {
        loop {
            let candidate = Uuid::new_v4();
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn emit(&mut self, event: &NotificationEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("active", &self.active.len())
            .field("pending_timers", &self.timers.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
