//! Clock abstraction and deadline queue for scheduled expiry.
//!
//! # Responsibility
//! - Provide wall-clock and manual clocks behind one trait.
//! - Track cancellable one-shot deadlines keyed by caller-defined ids.
//!
//! # Invariants
//! - Due timers drain in deadline order; ties drain in scheduling order.
//! - A cancelled timer never drains.
//! - Every `TimerId` handed out is unique for the queue lifetime.

use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for TTL scheduling and history dates.
pub trait Clock: Send + Sync {
    /// Monotonic-enough milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
    today: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    pub fn new(start_ms: u64, today: NaiveDate) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
            today: Arc::new(Mutex::new(today)),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set_today(&self, today: NaiveDate) {
        let mut guard = self
            .today
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = today;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        *self
            .today
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle for one scheduled deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// One-shot deadline queue.
#[derive(Debug)]
pub struct TimerQueue<K> {
    next_seq: u64,
    by_deadline: BTreeMap<(u64, u64), K>,
    deadlines: HashMap<u64, u64>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            by_deadline: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to become due at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, key: K) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_deadline.insert((deadline_ms, seq), key);
        self.deadlines.insert(seq, deadline_ms);
        TimerId(seq)
    }

    /// Cancels a pending timer. Returns `false` when it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(deadline) => self.by_deadline.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    /// Removes and returns every key due at or before `now_ms`.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<K> {
        let pending = self.by_deadline.split_off(&(now_ms.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.by_deadline, pending);
        due.into_iter()
            .map(|((_, seq), key)| {
                self.deadlines.remove(&seq);
                key
            })
            .collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.by_deadline.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.by_deadline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_deadline.is_empty()
    }
}
