//! Service-level tests for the draw orchestrator.

mod common;

use std::collections::HashSet;

use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use backend::repos::{assignments, groups};
use backend::services::assignments::assignment_for_giver;
use backend::services::draw::run_draw;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::test]
async fn draw_commits_a_valid_assignment_set() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, participants) = common::seed_ready_group(conn, 3).await;

    let mut rng = StdRng::seed_from_u64(7);
    let outcome = run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .expect("draw should succeed");

    assert_eq!(outcome.assignment_count, 3);

    let stored = assignments::list_for_group(conn, group.id).await.unwrap();
    assert_eq!(stored.len(), 3);

    let ids: HashSet<i64> = participants.iter().map(|p| p.id).collect();
    let givers: HashSet<i64> = stored.iter().map(|a| a.giver_id).collect();
    let receivers: HashSet<i64> = stored.iter().map(|a| a.receiver_id).collect();
    assert_eq!(givers, ids, "every participant gives exactly once");
    assert_eq!(receivers, ids, "every participant receives exactly once");
    for assignment in &stored {
        assert_ne!(
            assignment.giver_id, assignment.receiver_id,
            "nobody may draw themselves"
        );
    }

    let reloaded = groups::require_group(conn, group.id).await.unwrap();
    assert!(reloaded.drawn);
}

#[tokio::test]
async fn second_draw_is_rejected_as_already_drawn() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, _) = common::seed_ready_group(conn, 3).await;

    let mut rng = StdRng::seed_from_u64(1);
    run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .expect("first draw should succeed");

    let err = run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyDrawn, _)
    ));

    // No second assignment set was written
    let count = assignments::count_for_group(conn, group.id).await.unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn non_creator_cannot_draw() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (_, group, _) = common::seed_ready_group(conn, 3).await;
    let outsider = common::seed_user(conn, "+4917700000001", "Outsider").await;

    let mut rng = StdRng::seed_from_u64(2);
    let err = run_draw(conn, group.id, outsider.id, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn draw_requires_two_participants() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, _) = common::seed_ready_group(conn, 1).await;

    let mut rng = StdRng::seed_from_u64(3);
    let err = run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InsufficientParticipants, _)
    ));

    let reloaded = groups::require_group(conn, group.id).await.unwrap();
    assert!(!reloaded.drawn, "a failed draw must not flip the flag");
    let count = assignments::count_for_group(conn, group.id).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn draw_names_participants_with_empty_wish_lists() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, _) = common::seed_ready_group(conn, 2).await;

    // A third member joins but never adds a wish
    let slacker = common::seed_user(conn, "+4917700000002", "Slacker").await;
    let slacker_participant = common::seed_participant(conn, &group, &slacker).await;

    let mut rng = StdRng::seed_from_u64(4);
    let err = run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(ValidationKind::IncompleteWishLists, detail) => {
            assert!(
                detail.contains(&slacker_participant.anonymous_name),
                "error should name the offender, got: {detail}"
            );
        }
        other => panic!("expected incomplete wish list error, got {other:?}"),
    }

    let reloaded = groups::require_group(conn, group.id).await.unwrap();
    assert!(!reloaded.drawn);
    let count = assignments::count_for_group(conn, group.id).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn drawn_flag_flip_has_exactly_one_winner() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (_, group, _) = common::seed_ready_group(conn, 2).await;

    assert!(groups::mark_drawn(conn, group.id).await.unwrap());
    assert!(
        !groups::mark_drawn(conn, group.id).await.unwrap(),
        "losing racer must see the flip fail"
    );
}

#[tokio::test]
async fn concurrent_draws_commit_exactly_one_assignment_set() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, _) = common::seed_ready_group(conn, 4).await;

    let a = {
        let conn = conn.clone();
        let creator_id = creator.id;
        let group_id = group.id;
        tokio::spawn(async move {
            let mut rng = StdRng::seed_from_u64(100);
            run_draw(&conn, group_id, creator_id, &mut rng).await
        })
    };
    let b = {
        let conn = conn.clone();
        let creator_id = creator.id;
        let group_id = group.id;
        tokio::spawn(async move {
            let mut rng = StdRng::seed_from_u64(200);
            run_draw(&conn, group_id, creator_id, &mut rng).await
        })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent draw may win");

    for result in &results {
        if let Err(err) = result {
            assert!(
                matches!(
                    err,
                    DomainError::Conflict(ConflictKind::AlreadyDrawn, _)
                        | DomainError::Conflict(ConflictKind::DrawRace, _)
                ),
                "loser must see a draw conflict, got {err:?}"
            );
        }
    }

    let count = assignments::count_for_group(conn, group.id).await.unwrap();
    assert_eq!(count, 4, "never more than one assignment set");
}

#[tokio::test]
async fn assignment_lookup_before_and_after_draw() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, participants) = common::seed_ready_group(conn, 3).await;
    let my_participant = &participants[0];

    // Before the draw there is nothing to see
    let err = assignment_for_giver(conn, creator.id, my_participant.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Assignment, _)
    ));

    let mut rng = StdRng::seed_from_u64(5);
    run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .expect("draw should succeed");

    let view = assignment_for_giver(conn, creator.id, my_participant.id)
        .await
        .expect("assignment should be readable after the draw");
    assert_eq!(view.group_name, group.name);
    assert_ne!(view.receiver_anonymous_name, my_participant.anonymous_name);
    assert!(!view.receiver_wishes.is_empty());
}

#[tokio::test]
async fn assignment_is_private_to_its_giver() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, participants) = common::seed_ready_group(conn, 3).await;

    let mut rng = StdRng::seed_from_u64(6);
    run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .expect("draw should succeed");

    // The creator may not read another member's assignment
    let other_participant = &participants[1];
    let err = assignment_for_giver(conn, creator.id, other_participant.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn joining_a_drawn_group_is_rejected() {
    let state = common::test_state().await;
    let conn = common::db(&state);

    let (creator, group, _) = common::seed_ready_group(conn, 3).await;

    let mut rng = StdRng::seed_from_u64(8);
    run_draw(conn, group.id, creator.id, &mut rng)
        .await
        .expect("draw should succeed");

    let latecomer = common::seed_user(conn, "+4917700000003", "Latecomer").await;
    let err = backend::services::participants::join_group(conn, latecomer.id, &group.code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyDrawn, _)
    ));
}
