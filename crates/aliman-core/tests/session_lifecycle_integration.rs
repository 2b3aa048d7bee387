//! Integration tests for the focus session lifecycle.
//!
//! This test file verifies:
//! - Start/end scenarios with a manually driven clock
//! - Exit classification and reply selection on distracted exits
//! - At-most-once ending in memory and on disk
//! - The elapsed-minutes law

use std::sync::Arc;

use aliman_core::{
    Category, Clock, CoreError, Database, EndRequest, ExitType, ManualClock, SessionArena,
    DomainError, SessionState,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 6, 8, 15, 0).unwrap()
}

fn arena() -> (Arc<ManualClock>, SessionArena<Arc<ManualClock>>) {
    let clock = Arc::new(ManualClock::new(t0()));
    (clock.clone(), SessionArena::with_clock(clock))
}

#[test]
fn test_distracted_exit_after_thirty_minutes() {
    let (clock, arena) = arena();

    let session = arena.start(1, Some(25)).unwrap();
    assert_eq!(session.state(), SessionState::Active);

    clock.advance(Duration::minutes(30));
    let outcome = arena
        .end(session.id, 1, EndRequest::distracted("zerikdim"))
        .unwrap();

    assert_eq!(outcome.actual_minutes, 30);
    let classification = outcome.classification.as_ref().unwrap();
    assert_eq!(classification.category, Category::Distraction);
    assert!(outcome.response.as_deref().unwrap().contains("zerikdim"));

    let stored = arena.get(session.id, 1).unwrap();
    assert_eq!(stored.state(), SessionState::Ended);
    assert_eq!(stored.ended_at, Some(t0() + Duration::minutes(30)));
}

#[test]
fn test_valid_exit_uses_valid_template() {
    let (clock, arena) = arena();
    let session = arena.start(1, None).unwrap();
    clock.advance(Duration::minutes(3));

    let outcome = arena
        .end(session.id, 1, EndRequest::distracted("bosh og'riq"))
        .unwrap();
    assert_eq!(
        outcome.classification.as_ref().map(|c| c.category),
        Some(Category::Valid)
    );
    assert!(outcome.response.unwrap().contains("tushunarli sabab"));
}

#[test]
fn test_valid_reason_with_distraction_word_is_distraction() {
    let (_, arena) = arena();
    let session = arena.start(1, None).unwrap();
    let outcome = arena
        .end(session.id, 1, EndRequest::distracted("bosh og'riq, keyin telegram"))
        .unwrap();
    assert_eq!(
        outcome.classification.map(|c| c.category),
        Some(Category::Distraction)
    );
}

#[test]
fn test_non_positive_planned_duration_is_invalid() {
    let (_, arena) = arena();
    for minutes in [0, -1, -25] {
        assert!(matches!(
            arena.start(1, Some(minutes)),
            Err(DomainError::InvalidArgument { .. })
        ));
    }
    assert!(arena.sessions_for(1).is_empty());
}

#[test]
fn test_unended_session_stays_active() {
    let (clock, arena) = arena();
    let session = arena.start(1, Some(25)).unwrap();
    clock.advance(Duration::hours(10));
    let stored = arena.get(session.id, 1).unwrap();
    assert!(stored.is_active());
    assert_eq!(stored.actual_minutes, 0);
    assert_eq!(stored.elapsed_at(clock.now()), 600);
}

#[test]
fn test_database_end_is_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aliman.db");

    let db = Database::open_at(&path).unwrap();
    let session = db.start_session(1, 25, t0()).unwrap();
    db.end_session(
        session.id,
        1,
        EndRequest::distracted("instagram"),
        t0() + Duration::minutes(18),
    )
    .unwrap();

    // A second connection sees the terminal state and cannot overwrite it.
    let other = Database::open_at(&path).unwrap();
    let err = other
        .end_session(session.id, 1, EndRequest::completed(), t0() + Duration::hours(5))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::AlreadyEnded(id)) if id == session.id
    ));

    let stored = other.session(session.id, 1).unwrap();
    assert_eq!(stored.actual_minutes, 18);
    assert_eq!(stored.exit_type, ExitType::Distracted);
}

#[test]
fn test_database_unknown_session_is_not_found() {
    let db = Database::open_memory().unwrap();
    let err = db
        .end_session(42, 1, EndRequest::completed(), t0())
        .unwrap_err();
    assert_eq!(err.to_string(), "Session 42 not found");
}

proptest! {
    #[test]
    fn actual_minutes_is_floor_of_elapsed_seconds(secs in 0i64..(3 * 24 * 3600)) {
        let (clock, arena) = arena();
        let session = arena.start(1, None).unwrap();
        clock.advance(Duration::seconds(secs));
        let outcome = arena.end(session.id, 1, EndRequest::completed()).unwrap();
        prop_assert_eq!(i64::from(outcome.actual_minutes), secs / 60);
    }

    #[test]
    fn clock_going_backwards_yields_zero(secs in 1i64..100_000) {
        let (clock, arena) = arena();
        let session = arena.start(1, None).unwrap();
        clock.set(t0() - Duration::seconds(secs));
        let outcome = arena.end(session.id, 1, EndRequest::completed()).unwrap();
        prop_assert_eq!(outcome.actual_minutes, 0);
    }
}
