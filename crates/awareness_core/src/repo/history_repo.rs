//! Quiz history log persisted under a fixed store key.
//!
//! # Responsibility
//! - Read the append-only history list with graceful degradation.
//! - Append one entry by replacing the whole stored array.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable or corrupt data reads as empty.
//! - `append` keeps every previously readable entry; a failed read aborts
//!   the append instead of overwriting the log.

use crate::model::history::{QuizHistoryEntry, QUIZ_HISTORY_KEY};
use crate::repo::kv_store::{KeyValueStore, StoreError, StoreResult};
use log::{info, warn};

/// History log facade over any key-value store.
#[derive(Debug, Clone)]
pub struct QuizHistoryLog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> QuizHistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads all entries, oldest first.
    pub fn load(&self) -> Vec<QuizHistoryEntry> {
        match self.store.get(QUIZ_HISTORY_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=history_load module=repo status=degraded reason=store_error error={err}");
                Vec::new()
            }
        }
    }

    /// Appends one entry and returns the new log length.
    ///
    /// # Errors
    /// - Returns the store error when the current log cannot be read or the
    ///   write fails; the stored value is left untouched in both cases.
    pub fn append(&self, entry: QuizHistoryEntry) -> StoreResult<usize> {
        let mut entries = match self.store.get(QUIZ_HISTORY_KEY)? {
            Some(raw) => decode(&raw),
            None => Vec::new(),
        };
        entries.push(entry);

        let encoded = serde_json::to_string(&entries)
            .map_err(|err| StoreError::Unavailable(format!("history encode failed: {err}")))?;
        self.store.set(QUIZ_HISTORY_KEY, &encoded)?;

        info!(
            "event=history_append module=repo status=ok entries={}",
            entries.len()
        );
        Ok(entries.len())
    }

    /// Borrow of the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Corrupt or mistyped values read as an empty log.
fn decode(raw: &str) -> Vec<QuizHistoryEntry> {
    match serde_json::from_str::<Vec<QuizHistoryEntry>>(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                "event=history_load module=repo status=degraded reason=corrupt bytes={} error={err}",
                raw.len()
            );
            Vec::new()
        }
    }
}
