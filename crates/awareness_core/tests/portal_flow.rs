use awareness_core::content::quiz_questions;
use awareness_core::service::notification_center::QUIZ_RESULT_TITLE;
use awareness_core::service::overlay::NOTIFICATION_CONTAINER_ID;
use awareness_core::{
    ManualClock, MemoryKeyValueStore, NotificationDraft, NotificationKind, NotificationPortal,
    OverlayHost, OverlayPosition, QuizStatus, Rejection, Transition,
};
use chrono::NaiveDate;
use std::sync::Arc;

fn clock() -> ManualClock {
    ManualClock::new(1_000, NaiveDate::from_ymd_opt(2025, 5, 21).unwrap())
}

fn mount(
    host: &Arc<OverlayHost>,
    store: Arc<MemoryKeyValueStore>,
    clock: &ManualClock,
) -> NotificationPortal<Arc<MemoryKeyValueStore>> {
    NotificationPortal::mount(
        host,
        OverlayPosition::BottomRight,
        quiz_questions(),
        store,
        Arc::new(clock.clone()),
    )
    .unwrap()
}

#[test]
fn completed_quiz_publishes_result_notification() {
    let host = OverlayHost::new();
    let store = Arc::new(MemoryKeyValueStore::new());
    let clock = clock();
    let mut portal = mount(&host, Arc::clone(&store), &clock);

    assert_eq!(
        portal.select_answer(0),
        Transition::Rejected(Rejection::NoQuestions)
    );
    portal.toggle_quiz();
    assert!(portal.is_quiz_open());

    portal.select_answer(0);
    portal.advance();
    portal.select_answer(1);
    let transition = portal.advance();
    assert!(matches!(transition, Transition::Completed(outcome) if outcome.score == 2));

    let notifications: Vec<_> = portal.notifications().cloned().collect();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].title, QUIZ_RESULT_TITLE);
    assert_eq!(host.children(NOTIFICATION_CONTAINER_ID), 1);

    clock.advance(8_000);
    assert_eq!(portal.tick(), 1);
    assert_eq!(host.children(NOTIFICATION_CONTAINER_ID), 0);
    assert!(host.contains(NOTIFICATION_CONTAINER_ID));
}

#[test]
fn each_completed_run_publishes_exactly_one_result() {
    let host = OverlayHost::new();
    let store = Arc::new(MemoryKeyValueStore::new());
    let clock = clock();
    let mut portal = mount(&host, store, &clock);
    portal.set_quiz_visible(true);

    portal.select_answer(0);
    portal.advance();
    portal.select_answer(1);
    portal.advance();
    assert_eq!(
        portal.advance(),
        Transition::Rejected(Rejection::AlreadyCompleted)
    );
    assert_eq!(portal.notifications().count(), 1);

    assert_eq!(portal.reset_quiz(), Transition::Applied);
    portal.select_answer(1);
    portal.advance();
    portal.select_answer(0);
    assert!(matches!(portal.advance(), Transition::Completed(outcome) if outcome.score == 0));
    let kinds: Vec<_> = portal.notifications().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Error]);

    portal.toggle_quiz();
    portal.toggle_quiz();
    portal.select_answer(0);
    portal.advance();
    portal.select_answer(1);
    portal.advance();
    assert_eq!(portal.notifications().count(), 3);
    assert_eq!(host.children(NOTIFICATION_CONTAINER_ID), 3);
}

#[test]
fn hiding_the_quiz_discards_the_run_but_not_history() {
    let host = OverlayHost::new();
    let store = Arc::new(MemoryKeyValueStore::new());
    let clock = clock();
    let mut portal = mount(&host, store, &clock);

    portal.set_quiz_visible(true);
    portal.select_answer(0);
    portal.advance();
    portal.select_answer(1);
    portal.advance();
    assert_eq!(portal.quiz().unwrap().status(), QuizStatus::Completed);

    portal.toggle_quiz();
    assert!(portal.quiz().is_none());

    portal.toggle_quiz();
    let quiz = portal.quiz().unwrap();
    assert_eq!(quiz.status(), QuizStatus::InProgress);
    assert_eq!(quiz.run().current_index, 0);
    assert_eq!(quiz.history().len(), 1);
}

#[test]
fn empty_question_list_never_opens_the_modal() {
    let host = OverlayHost::new();
    let mut portal = NotificationPortal::mount(
        &host,
        OverlayPosition::default(),
        Vec::new(),
        Arc::new(MemoryKeyValueStore::new()),
        Arc::new(clock()),
    )
    .unwrap();

    portal.toggle_quiz();
    assert!(!portal.is_quiz_open());
    assert!(portal.quiz().is_none());
    assert_eq!(portal.position(), OverlayPosition::TopRight);
}

#[test]
fn overlay_container_is_shared_and_removed_with_last_portal() {
    let host = OverlayHost::new();
    let clock = clock();
    let mut first = mount(&host, Arc::new(MemoryKeyValueStore::new()), &clock);
    let second = mount(&host, Arc::new(MemoryKeyValueStore::new()), &clock);

    assert_eq!(host.container_count(), 1);
    assert_eq!(first.container_id(), NOTIFICATION_CONTAINER_ID);

    first.notify(NotificationDraft::new(
        NotificationKind::Info,
        "Нова стаття",
        "Прочитайте про екологію",
    ));
    assert_eq!(host.children(NOTIFICATION_CONTAINER_ID), 1);
    let id = first.notifications().next().unwrap().id;

    first.dismiss(id);
    assert_eq!(host.children(NOTIFICATION_CONTAINER_ID), 0);

    drop(first);
    assert!(host.contains(NOTIFICATION_CONTAINER_ID));
    drop(second);
    assert!(!host.contains(NOTIFICATION_CONTAINER_ID));
    assert_eq!(host.container_count(), 0);
}

#[test]
fn portal_rejects_invalid_questions() {
    let host = OverlayHost::new();
    let mut questions = quiz_questions();
    questions[0].options.truncate(1);

    let result = NotificationPortal::mount(
        &host,
        OverlayPosition::TopLeft,
        questions,
        Arc::new(MemoryKeyValueStore::new()),
        Arc::new(clock()),
    );

    assert!(result.is_err());
    assert_eq!(host.container_count(), 0);
}
