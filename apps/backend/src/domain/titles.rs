//! Post-game achievement titles.
//!
//! Titles are derived from recorded per-player stats through a fixed rule
//! table. The computation is deterministic (ties go to the lower player id),
//! so racing compute passes always produce the same result set; the
//! persistence layer guarantees only one of them lands.

use serde::{Deserialize, Serialize};

/// One entry of the fixed rule table.
#[derive(Debug, Clone, Copy)]
pub struct TitleRule {
    pub name: &'static str,
    pub description: &'static str,
    /// Stat metric the rule reads; the player with the highest value wins.
    pub metric: &'static str,
    pub points: i32,
    pub comedic: bool,
}

/// The rule table. A rule only awards a title when at least one player has a
/// positive value for its metric, so games without recorded fumbles simply
/// produce no Butterfingers.
pub const TITLE_RULES: &[TitleRule] = &[
    TitleRule {
        name: "MVP",
        description: "Most points scored across the whole game",
        metric: "points_scored",
        points: 3,
        comedic: false,
    },
    TitleRule {
        name: "Clutch",
        description: "Most clutch plays when it actually mattered",
        metric: "clutch_plays",
        points: 2,
        comedic: false,
    },
    TitleRule {
        name: "Butterfingers",
        description: "Most fumbles, drops and whiffs",
        metric: "fumbles",
        points: 1,
        comedic: true,
    },
    TitleRule {
        name: "Showboat",
        description: "Most celebrations, earned or otherwise",
        metric: "celebrations",
        points: 1,
        comedic: true,
    },
];

/// A recorded per-player stat value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player_id: i64,
    pub metric: String,
    pub value: i32,
}

/// One computed title award, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleResult {
    pub player_id: i64,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub comedic: bool,
}

/// Run the rule table over recorded stats. Single pass, deterministic.
pub fn compute_titles(stats: &[PlayerStat]) -> Vec<TitleResult> {
    TITLE_RULES
        .iter()
        .filter_map(|rule| {
            let mut best: Option<(i64, i32)> = None;
            for stat in stats.iter().filter(|s| s.metric == rule.metric && s.value > 0) {
                best = match best {
                    None => Some((stat.player_id, stat.value)),
                    Some((best_id, best_value)) => {
                        if stat.value > best_value
                            || (stat.value == best_value && stat.player_id < best_id)
                        {
                            Some((stat.player_id, stat.value))
                        } else {
                            Some((best_id, best_value))
                        }
                    }
                };
            }
            best.map(|(player_id, _)| TitleResult {
                player_id,
                name: rule.name.to_string(),
                description: rule.description.to_string(),
                points: rule.points,
                comedic: rule.comedic,
            })
        })
        .collect()
}

/// A completed game reduced to its point split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedGame {
    pub winning_team_id: i64,
    pub winner_points: i32,
    pub loser_points: i32,
}

/// One persisted title award reduced to scoring inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleAward {
    pub player_id: i64,
    pub points: i32,
}

/// Recompute both team totals from rows.
///
/// Totals are always rebuilt from completed games and persisted titles; they
/// are never incremented in place. Running this twice is therefore a no-op,
/// which is what makes the team-point merge idempotent under retries and
/// duplicate notifications.
pub fn team_totals(
    team_a_id: i64,
    team_b_id: i64,
    games: &[CompletedGame],
    titles: &[TitleAward],
    roster: &[(i64, Option<i64>)],
) -> (i32, i32) {
    let mut total_a = 0;
    let mut total_b = 0;

    for game in games {
        if game.winning_team_id == team_a_id {
            total_a += game.winner_points;
            total_b += game.loser_points;
        } else {
            total_b += game.winner_points;
            total_a += game.loser_points;
        }
    }

    for title in titles {
        let team = roster
            .iter()
            .find(|(player_id, _)| *player_id == title.player_id)
            .and_then(|(_, team_id)| *team_id);
        match team {
            Some(t) if t == team_a_id => total_a += title.points,
            Some(t) if t == team_b_id => total_b += title.points,
            _ => {}
        }
    }

    (total_a, total_b)
}
