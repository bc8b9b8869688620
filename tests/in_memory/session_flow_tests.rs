//! End-to-end session flows over the in-memory store.

use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use tasklight::todo::{
    adapters::memory::StaticIdentity,
    domain::{Task, UserId},
    services::SessionSettings,
};

use super::helpers::{Backend, alice, backend, instant};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_survive_a_new_session_within_a_day(backend: Backend, alice: UserId) {
    let mut session = backend.open_for(&alice).await;
    let now = backend.clock.utc();
    let milk = session
        .create("buy milk", Some("09:30"), now)
        .expect("task created");
    session.create("call mum", None, now).expect("task created");
    session.toggle_complete(milk, now + TimeDelta::minutes(5));
    session.close().await;

    backend.clock.advance(TimeDelta::hours(6));
    let reopened = backend.open_for(&alice).await;

    let texts: Vec<&str> = reopened.tasks().iter().map(Task::text).collect();
    assert_eq!(texts, vec!["buy milk", "call mum"]);
    assert!(reopened.tasks().first().is_some_and(Task::is_completed));
    assert_eq!(reopened.statistics().completion_rate, 50);
    reopened.close().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_never_see_each_others_tasks(backend: Backend, alice: UserId) {
    let bob = UserId::new("bob").expect("valid user id");
    let mut alice_session = backend.open_for(&alice).await;
    alice_session
        .create("alice's task", None, backend.clock.utc())
        .expect("task created");
    alice_session.close().await;

    let bob_session = backend.open_for(&bob).await;

    assert!(bob_session.tasks().is_empty());
    assert_eq!(backend.store.len(), 1);
    bob_session.close().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_list_expires_a_day_after_the_last_write(backend: Backend, alice: UserId) {
    let mut session = backend.open_for(&alice).await;
    session
        .create("fleeting", None, backend.clock.utc())
        .expect("task created");
    session.close().await;

    backend.clock.advance(TimeDelta::hours(24));
    let reopened = backend.open_for(&alice).await;

    assert!(reopened.tasks().is_empty());
    assert!(backend.store.is_empty());
    reopened.close().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_tasks_are_filtered_even_while_the_key_lives(backend: Backend, alice: UserId) {
    let mut session = backend.open_for(&alice).await;
    session
        .create("early", None, backend.clock.utc())
        .expect("task created");
    backend.clock.advance(TimeDelta::hours(12));
    session
        .create("late", None, backend.clock.utc())
        .expect("task created");
    session.close().await;

    backend.clock.advance(TimeDelta::hours(13));
    let reopened = backend.open_for(&alice).await;

    let texts: Vec<&str> = reopened.tasks().iter().map(Task::text).collect();
    assert_eq!(texts, vec!["late"]);
    reopened.close().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_session_writes_nothing(backend: Backend) {
    let mut session = backend
        .open_with(&StaticIdentity::anonymous(), SessionSettings::default())
        .await;

    assert_eq!(session.create("ghost", None, backend.clock.utc()), None);
    session.close().await;

    assert!(backend.store.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reminder_fires_through_the_recording_notifier(backend: Backend, alice: UserId) {
    let mut session = backend.open_for(&alice).await;
    session
        .create("stand-up", Some("10:00"), instant(9, 0))
        .expect("task created");

    let outcome = session.tick(&instant(9, 51)).await;
    session.close().await;

    assert_eq!(outcome.reminded, 1);
    let delivered = backend.notifier.delivered();
    assert_eq!(
        delivered.first().map(|notice| notice.body.as_str()),
        Some("Your task is due in 9 minutes at 10:00")
    );

    let reopened = backend.open_for(&alice).await;
    assert!(reopened.tasks().iter().all(Task::is_notified));
    reopened.close().await;
}
