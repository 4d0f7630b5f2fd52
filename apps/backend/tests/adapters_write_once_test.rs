//! Write-once and optimistic-lock guards, exercised over a mock connection.
//!
//! Each adapter guard is a conditional UPDATE; the mock scripts rows_affected
//! so both sides of the race are observable, and the transaction log shows
//! the guard predicate actually reached the database.

mod support;

use backend::domain::tiebreak::DiceRoll;
use backend::errors::domain::{ConflictKind, DomainError};
use backend::repos::tournaments::TournamentUpdate;
use backend::repos::{games, players, tournaments};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use support::tournament_model;

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn double_dice_roll_persists_one_value() -> Result<(), Box<dyn std::error::Error>> {
    let first = DiceRoll {
        team_a_roll: 6,
        team_b_roll: 2,
    };
    let second = DiceRoll {
        team_a_roll: 1,
        team_b_roll: 4,
    };

    let mut stored = tournament_model(7, 2);
    stored.dice_roll_data = Some(serde_json::to_value(first)?);

    // First roller lands the write; the second loses the IS NULL guard and
    // reads back the winner's value.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(0)])
        .append_query_results([[stored.clone()], [stored.clone()]])
        .into_connection();

    let (tournament, wrote) = tournaments::set_dice_roll_once(&db, 7, first).await?;
    assert!(wrote);
    assert_eq!(tournament.dice_roll, Some(first));

    let (tournament, wrote) = tournaments::set_dice_roll_once(&db, 7, second).await?;
    assert!(!wrote);
    assert_eq!(tournament.dice_roll, Some(first));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("dice_roll_data"));
    assert!(log.contains("IS NULL"));
    Ok(())
}

#[tokio::test]
async fn double_titles_claim_flips_once() -> Result<(), Box<dyn std::error::Error>> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(0)])
        .into_connection();

    assert!(games::claim_titles_computed(&db, 3).await?);
    assert!(!games::claim_titles_computed(&db, 3).await?);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("titles_computed"));
    Ok(())
}

#[tokio::test]
async fn double_reveal_tap_advances_once() -> Result<(), Box<dyn std::error::Error>> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(0)])
        .into_connection();

    assert!(games::advance_reveal_index(&db, 3, 0).await?);
    // Same from_index again: the cursor already moved, the guard rejects it.
    assert!(!games::advance_reveal_index(&db, 3, 0).await?);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("reveal_index"));
    Ok(())
}

#[tokio::test]
async fn double_draft_assignment_binds_once() -> Result<(), Box<dyn std::error::Error>> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(0)])
        .into_connection();

    assert!(players::assign_team_once(&db, 42, 10).await?);
    assert!(!players::assign_team_once(&db, 42, 11).await?);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("team_id"));
    assert!(log.contains("IS NULL"));
    Ok(())
}

#[tokio::test]
async fn stale_lock_version_surfaces_optimistic_lock() {
    // UPDATE misses because the row moved on to version 5; the refetch feeds
    // the structured conflict payload.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .append_query_results([[tournament_model(7, 5)]])
        .into_connection();

    let err = tournaments::update_tournament(&db, TournamentUpdate::new(7, 3).with_current_round(2))
        .await
        .unwrap_err();

    match err {
        DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
            assert!(detail.contains("expected version 3"));
            assert!(detail.contains("actual version 5"));
        }
        other => panic!("expected optimistic lock conflict, got {other:?}"),
    }
}
