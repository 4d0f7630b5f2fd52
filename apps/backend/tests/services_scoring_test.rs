//! Title compute idempotence at the service layer, over a mock connection.

mod support;

use backend::entities::games::GameStatus;
use backend::services::flow::TournamentFlowService;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, TransactionTrait};
use support::{game_model, referee_model, title_model};

#[tokio::test]
async fn recompute_returns_persisted_set_without_writing() -> Result<(), Box<dyn std::error::Error>>
{
    let mut game = game_model(3, 7, GameStatus::Completed);
    game.titles_computed = true;
    let titles = vec![
        title_model(1, 3, 100, "Top Scorer"),
        title_model(2, 3, 101, "Iron Wall"),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[game]])
        .append_query_results([[referee_model(9, 7)]])
        .append_query_results([titles])
        .into_connection();

    let txn = db.begin().await?;
    let service = TournamentFlowService::new();
    let result = service.compute_titles_once(&txn, 3, 9).await?;
    txn.commit().await?;

    let names: Vec<&str> = result.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Top Scorer", "Iron Wall"]);

    // No second title set, no team total writes.
    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("INSERT"));
    assert!(!log.contains("UPDATE"));
    Ok(())
}

#[tokio::test]
async fn losing_compute_claim_rereads_winner_set() -> Result<(), Box<dyn std::error::Error>> {
    let game = game_model(3, 7, GameStatus::Completed);
    let titles = vec![title_model(1, 3, 100, "Top Scorer")];

    // The claim UPDATE misses rows: another pass flipped titles_computed
    // between this caller's read and its write.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[game]])
        .append_query_results([[referee_model(9, 7)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results([titles])
        .into_connection();

    let txn = db.begin().await?;
    let service = TournamentFlowService::new();
    let result = service.compute_titles_once(&txn, 3, 9).await?;
    txn.commit().await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Top Scorer");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("INSERT"));
    assert!(!log.contains("total_points"));
    Ok(())
}
