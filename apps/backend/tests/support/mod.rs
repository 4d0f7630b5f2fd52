#![allow(dead_code)]

//! Row fixtures for mock-connection tests.

use backend::entities::games::{self, GameStatus};
use backend::entities::players::{self, PlayerRole};
use backend::entities::titles;
use backend::entities::tournaments::{self, TournamentStatus};

pub fn tournament_model(id: i64, lock_version: i32) -> tournaments::Model {
    let now = time::OffsetDateTime::now_utc();
    tournaments::Model {
        id,
        room_code: "ABC123".to_string(),
        status: TournamentStatus::Playing,
        num_games: 5,
        current_round: 1,
        draft_turn: None,
        draft_pick_number: 0,
        dice_roll_data: None,
        created_at: now,
        updated_at: now,
        lock_version,
    }
}

pub fn game_model(id: i64, tournament_id: i64, status: GameStatus) -> games::Model {
    let now = time::OffsetDateTime::now_utc();
    games::Model {
        id,
        tournament_id,
        game_type_id: 1,
        round_no: 1,
        picked_by_team_id: 10,
        status,
        winning_team_id: None,
        winner_points: None,
        loser_points: None,
        titles_computed: false,
        reveal_index: 0,
        created_at: now,
        updated_at: now,
        lock_version: 1,
    }
}

pub fn referee_model(id: i64, tournament_id: i64) -> players::Model {
    let now = time::OffsetDateTime::now_utc();
    players::Model {
        id,
        tournament_id,
        team_id: None,
        display_name: "Ref".to_string(),
        role: PlayerRole::Referee,
        is_captain: false,
        is_leader: false,
        device_token: format!("device-{id}"),
        created_at: now,
        updated_at: now,
    }
}

pub fn title_model(id: i64, game_id: i64, player_id: i64, name: &str) -> titles::Model {
    titles::Model {
        id,
        game_id,
        player_id,
        name: name.to_string(),
        description: format!("{name} of game {game_id}"),
        points: 1,
        comedic: false,
        created_at: time::OffsetDateTime::now_utc(),
    }
}
