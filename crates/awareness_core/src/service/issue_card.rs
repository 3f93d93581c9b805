//! Issue card presentation state.
//!
//! # Responsibility
//! - Hold local card flags: expanded, bookmarked, view count.
//! - Derive the learn-more slug and hand it to the caller's handler.
//! - Count views from an injected visibility observer.
//!
//! # Invariants
//! - Expansion is offered only for descriptions over the threshold.
//! - One view is counted per crossing into visibility, never per report.
//! - Each mount observes under its own key, so cards sharing a slug never
//!   share or cancel each other's tracking.
//! - Bookmark state is local to the mounted card and never persisted.

use crate::model::issue::IssueSummary;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Descriptions longer than this many characters are collapsible.
pub const EXPANSION_THRESHOLD_CHARS: usize = 150;
/// Visible fraction of the card that counts as "seen".
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

static NEXT_OBSERVATION: AtomicU64 = AtomicU64::new(1);

/// Receives intersection ratios in `[0.0, 1.0]` for one observed card.
pub type VisibilitySink = Box<dyn FnMut(f32)>;

/// Host capability reporting how much of a card is on screen.
pub trait VisibilityObserver {
    /// Starts reporting ratios for `key` into `sink`.
    fn observe(&mut self, key: &str, sink: VisibilitySink);
    /// Stops reporting for `key`; unknown keys are ignored.
    fn unobserve(&mut self, key: &str);
}

/// Observer for hosts without a viewport: every card is fully visible once.
#[derive(Debug, Default)]
pub struct ImmediateVisibilityObserver;

impl VisibilityObserver for ImmediateVisibilityObserver {
    fn observe(&mut self, _key: &str, mut sink: VisibilitySink) {
        sink(1.0);
    }

    fn unobserve(&mut self, _key: &str) {}
}

#[derive(Debug, Default)]
struct ViewTracker {
    visible: Cell<bool>,
    views: Cell<u32>,
}

impl ViewTracker {
    fn record(&self, ratio: f32) {
        let now_visible = ratio >= VISIBILITY_THRESHOLD;
        if now_visible && !self.visible.get() {
            self.views.set(self.views.get().saturating_add(1));
        }
        self.visible.set(now_visible);
    }
}

type LearnMoreHandler = Box<dyn FnMut(&str)>;

/// Mounted card for one issue.
pub struct IssueCard {
    issue: IssueSummary,
    slug: String,
    observation_key: String,
    expanded: bool,
    bookmarked: bool,
    tracker: Rc<ViewTracker>,
    on_learn_more: LearnMoreHandler,
}

impl IssueCard {
    /// Mounts a card and starts view tracking through `observer`.
    pub fn mount(
        issue: IssueSummary,
        on_learn_more: impl FnMut(&str) + 'static,
        observer: &mut dyn VisibilityObserver,
    ) -> Self {
        let slug = issue.slug();
        let observation_key = format!(
            "{slug}#{}",
            NEXT_OBSERVATION.fetch_add(1, Ordering::Relaxed)
        );
        let tracker = Rc::new(ViewTracker::default());
        let sink_tracker = Rc::clone(&tracker);
        observer.observe(
            &observation_key,
            Box::new(move |ratio| sink_tracker.record(ratio)),
        );

        Self {
            issue,
            slug,
            observation_key,
            expanded: false,
            bookmarked: false,
            tracker,
            on_learn_more: Box::new(on_learn_more),
        }
    }

    /// Stops view tracking; the view count is discarded with the card.
    pub fn unmount(self, observer: &mut dyn VisibilityObserver) {
        observer.unobserve(&self.observation_key);
    }

    pub fn issue(&self) -> &IssueSummary {
        &self.issue
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Key this mount was registered under with the visibility observer.
    pub fn observation_key(&self) -> &str {
        &self.observation_key
    }

    pub fn can_expand(&self) -> bool {
        self.issue.description.chars().count() > EXPANSION_THRESHOLD_CHARS
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Toggles expansion; a no-op for short descriptions.
    pub fn toggle_expanded(&mut self) {
        if self.can_expand() {
            self.expanded = !self.expanded;
        }
    }

    /// Description as rendered: truncated with an ellipsis while collapsed.
    pub fn visible_description(&self) -> String {
        if self.expanded || !self.can_expand() {
            return self.issue.description.clone();
        }
        let mut truncated: String = self
            .issue
            .description
            .chars()
            .take(EXPANSION_THRESHOLD_CHARS)
            .collect();
        truncated.push('…');
        truncated
    }

    /// Label of the expand control, if one is shown.
    pub fn expand_label(&self) -> Option<&'static str> {
        if !self.can_expand() {
            return None;
        }
        Some(if self.expanded {
            "Згорнути"
        } else {
            "Читати далі"
        })
    }

    pub fn toggle_bookmark(&mut self) {
        self.bookmarked = !self.bookmarked;
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Times the card became visible since mount.
    pub fn views(&self) -> u32 {
        self.tracker.views.get()
    }

    /// Invokes the learn-more handler with this card's slug.
    pub fn learn_more(&mut self) {
        (self.on_learn_more)(&self.slug);
    }

    pub fn severity_label(&self) -> &'static str {
        self.issue.severity.label()
    }

    pub fn severity_class(&self) -> &'static str {
        self.issue.severity.badge_class()
    }
}

impl std::fmt::Debug for IssueCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueCard")
            .field("slug", &self.slug)
            .field("observation_key", &self.observation_key)
            .field("expanded", &self.expanded)
            .field("bookmarked", &self.bookmarked)
            .field("views", &self.views())
            .finish()
    }
}
