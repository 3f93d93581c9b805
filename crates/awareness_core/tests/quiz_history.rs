use awareness_core::content::quiz_questions;
use awareness_core::{
    open_db, open_db_in_memory, KeyValueStore, ManualClock, MemoryKeyValueStore, QuizEngine,
    QuizHistoryEntry, QuizHistoryLog, SqliteKeyValueStore, StoreError, StoreResult, Transition,
    QUIZ_HISTORY_KEY,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::cell::Cell;
use std::sync::Arc;

struct FailingWrites {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for FailingWrites {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}

struct Unreachable;

impl KeyValueStore for Unreachable {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

struct FlakyReads {
    inner: MemoryKeyValueStore,
    fail_next_get: Cell<bool>,
}

impl FlakyReads {
    fn new() -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            fail_next_get: Cell::new(false),
        }
    }
}

impl KeyValueStore for FlakyReads {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_next_get.replace(false) {
            return Err(StoreError::Unavailable("read timed out".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value)
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        0,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ))
}

#[test]
fn append_preserves_previous_entries_in_order() {
    let log = QuizHistoryLog::new(MemoryKeyValueStore::new());

    assert_eq!(log.append(QuizHistoryEntry::new(2, 2, "2025-05-01")).unwrap(), 1);
    assert_eq!(log.append(QuizHistoryEntry::new(0, 2, "2025-05-02")).unwrap(), 2);

    let entries = log.load();
    assert_eq!(
        entries,
        vec![
            QuizHistoryEntry::new(2, 2, "2025-05-01"),
            QuizHistoryEntry::new(0, 2, "2025-05-02"),
        ]
    );
}

#[test]
fn corrupt_or_mistyped_history_reads_as_empty() {
    let store = MemoryKeyValueStore::new();
    let log = QuizHistoryLog::new(&store);

    store.set(QUIZ_HISTORY_KEY, "{not json").unwrap();
    assert!(log.load().is_empty());

    store.set(QUIZ_HISTORY_KEY, r#"{"score":1}"#).unwrap();
    assert!(log.load().is_empty());

    log.append(QuizHistoryEntry::new(1, 2, "2025-05-03")).unwrap();
    assert_eq!(log.load().len(), 1);
}

#[test]
fn existing_history_written_by_other_clients_is_readable() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            QUIZ_HISTORY_KEY,
            r#"[{"score":3,"total":5,"date":"2025-04-30"}]"#,
        )
        .unwrap();

    let engine = QuizEngine::mount(quiz_questions(), &store, clock()).unwrap();
    assert_eq!(
        engine.history().to_vec(),
        vec![QuizHistoryEntry::new(3, 5, "2025-04-30")]
    );
}

#[test]
fn failing_writes_do_not_block_completion() {
    let store = FailingWrites {
        inner: MemoryKeyValueStore::new(),
    };
    let mut engine = QuizEngine::mount(quiz_questions(), &store, clock()).unwrap();

    engine.select_answer(0);
    engine.advance();
    engine.select_answer(1);
    let transition = engine.advance();

    assert!(matches!(transition, Transition::Completed(_)));
    assert!(engine.history().is_empty());
    assert!(store.inner.get(QUIZ_HISTORY_KEY).unwrap().is_none());
}

#[test]
fn unreachable_store_degrades_to_empty_history() {
    let log = QuizHistoryLog::new(Unreachable);
    assert!(log.load().is_empty());
    assert!(matches!(
        log.append(QuizHistoryEntry::new(1, 1, "2025-05-04")),
        Err(StoreError::Unavailable(_))
    ));
}

#[test]
fn read_failure_during_append_keeps_existing_entries() {
    let store = FlakyReads::new();
    let log = QuizHistoryLog::new(&store);
    log.append(QuizHistoryEntry::new(2, 2, "2025-05-01")).unwrap();
    log.append(QuizHistoryEntry::new(1, 2, "2025-05-02")).unwrap();
    let before = store.inner.get(QUIZ_HISTORY_KEY).unwrap();

    store.fail_next_get.set(true);
    assert!(matches!(
        log.append(QuizHistoryEntry::new(0, 2, "2025-05-03")),
        Err(StoreError::Unavailable(_))
    ));
    assert_eq!(store.inner.get(QUIZ_HISTORY_KEY).unwrap(), before);

    assert_eq!(log.append(QuizHistoryEntry::new(0, 2, "2025-05-03")).unwrap(), 3);
    assert_eq!(
        log.load(),
        vec![
            QuizHistoryEntry::new(2, 2, "2025-05-01"),
            QuizHistoryEntry::new(1, 2, "2025-05-02"),
            QuizHistoryEntry::new(0, 2, "2025-05-03"),
        ]
    );
}

#[test]
fn completion_after_a_failed_read_leaves_history_intact() {
    let store = FlakyReads::new();
    store
        .set(
            QUIZ_HISTORY_KEY,
            r#"[{"score":3,"total":5,"date":"2025-04-30"}]"#,
        )
        .unwrap();
    let mut engine = QuizEngine::mount(quiz_questions(), &store, clock()).unwrap();

    engine.select_answer(0);
    engine.advance();
    engine.select_answer(1);
    store.fail_next_get.set(true);
    let transition = engine.advance();

    assert!(matches!(transition, Transition::Completed(_)));
    assert_eq!(
        engine.history().to_vec(),
        vec![QuizHistoryEntry::new(3, 5, "2025-04-30")]
    );
    assert_eq!(
        QuizHistoryLog::new(&store).load(),
        vec![QuizHistoryEntry::new(3, 5, "2025-04-30")]
    );
}

#[test]
fn sqlite_store_requires_migrated_schema() {
    let raw = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteKeyValueStore::try_new(&raw),
        Err(StoreError::MissingSchema("kv_store"))
    ));

    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(store.get("missing").unwrap(), None);
    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
}

#[test]
fn history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awareness.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut engine = QuizEngine::mount(quiz_questions(), store, clock()).unwrap();
        engine.select_answer(0);
        engine.advance();
        engine.select_answer(1);
        engine.advance();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let entries = QuizHistoryLog::new(store).load();
    assert_eq!(entries, vec![QuizHistoryEntry::new(2, 2, "2025-06-01")]);
}
