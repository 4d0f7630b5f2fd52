use super::titles::{
    compute_titles, team_totals, CompletedGame, PlayerStat, TitleAward, TITLE_RULES,
};

fn stat(player_id: i64, metric: &str, value: i32) -> PlayerStat {
    PlayerStat {
        player_id,
        metric: metric.to_string(),
        value,
    }
}

#[test]
fn rule_table_covers_the_four_metrics() {
    let metrics: Vec<&str> = TITLE_RULES.iter().map(|r| r.metric).collect();
    assert_eq!(
        metrics,
        vec!["points_scored", "clutch_plays", "fumbles", "celebrations"]
    );
}

#[test]
fn titles_go_to_the_top_value_per_metric() {
    let stats = vec![
        stat(1, "points_scored", 12),
        stat(2, "points_scored", 7),
        stat(2, "fumbles", 3),
        stat(1, "fumbles", 1),
    ];
    let titles = compute_titles(&stats);
    assert_eq!(titles.len(), 2);

    let mvp = titles.iter().find(|t| t.name == "MVP").unwrap();
    assert_eq!(mvp.player_id, 1);
    assert_eq!(mvp.points, 3);
    assert!(!mvp.comedic);

    let butterfingers = titles.iter().find(|t| t.name == "Butterfingers").unwrap();
    assert_eq!(butterfingers.player_id, 2);
    assert_eq!(butterfingers.points, 1);
    assert!(butterfingers.comedic);
}

#[test]
fn zero_and_negative_values_award_nothing() {
    let stats = vec![stat(1, "clutch_plays", 0), stat(2, "celebrations", -1)];
    assert!(compute_titles(&stats).is_empty());
}

#[test]
fn empty_stats_produce_no_titles() {
    assert!(compute_titles(&[]).is_empty());
}

#[test]
fn ties_break_to_the_lower_player_id() {
    let stats = vec![stat(5, "clutch_plays", 4), stat(2, "clutch_plays", 4)];
    let titles = compute_titles(&stats);
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].player_id, 2);
}

#[test]
fn recomputation_is_deterministic() {
    let stats = vec![
        stat(3, "points_scored", 9),
        stat(1, "points_scored", 9),
        stat(2, "celebrations", 2),
    ];
    let first = compute_titles(&stats);
    let second = compute_titles(&stats);
    assert_eq!(first, second);
}

#[test]
fn team_totals_rebuild_from_rows() {
    let games = vec![
        CompletedGame {
            winning_team_id: 10,
            winner_points: 10,
            loser_points: 5,
        },
        CompletedGame {
            winning_team_id: 20,
            winner_points: 10,
            loser_points: 5,
        },
    ];
    let titles = vec![
        TitleAward {
            player_id: 1,
            points: 3,
        },
        TitleAward {
            player_id: 2,
            points: 1,
        },
    ];
    // Player 1 is on team 10, player 2 on team 20.
    let roster = vec![(1, Some(10)), (2, Some(20))];

    let (a, b) = team_totals(10, 20, &games, &titles, &roster);
    assert_eq!(a, 10 + 5 + 3);
    assert_eq!(b, 5 + 10 + 1);

    // Recomputing over the same rows is a no-op, not a double count.
    let again = team_totals(10, 20, &games, &titles, &roster);
    assert_eq!(again, (a, b));
}

#[test]
fn titles_for_unassigned_players_score_nowhere() {
    let titles = vec![TitleAward {
        player_id: 9,
        points: 3,
    }];
    let roster = vec![(9, None)];
    assert_eq!(team_totals(10, 20, &[], &titles, &roster), (0, 0));
}
