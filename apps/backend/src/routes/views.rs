//! JSON views of the domain models.

use serde::Serialize;

use crate::domain::tiebreak::DiceRoll;
use crate::entities::games::GameStatus;
use crate::entities::players::PlayerRole;
use crate::entities::tournaments::TournamentStatus;
use crate::repos::games::Game;
use crate::repos::players::Player;
use crate::repos::teams::Team;
use crate::repos::titles::Title;
use crate::repos::tournaments::Tournament;

#[derive(Debug, Clone, Serialize)]
pub struct TournamentView {
    pub id: i64,
    pub room_code: String,
    pub status: TournamentStatus,
    pub num_games: i16,
    pub current_round: i16,
    pub draft_turn: Option<i64>,
    pub draft_pick_number: i32,
    pub dice_roll: Option<DiceRoll>,
    pub lock_version: i32,
}

impl From<&Tournament> for TournamentView {
    fn from(t: &Tournament) -> Self {
        Self {
            id: t.id,
            room_code: t.room_code.clone(),
            status: t.status,
            num_games: t.num_games,
            current_round: t.current_round,
            draft_turn: t.draft_turn,
            draft_pick_number: t.draft_pick_number,
            dice_roll: t.dice_roll,
            lock_version: t.lock_version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: i64,
    pub team_id: Option<i64>,
    pub display_name: String,
    pub role: PlayerRole,
    pub is_captain: bool,
    pub is_leader: bool,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            team_id: p.team_id,
            display_name: p.display_name.clone(),
            role: p.role,
            is_captain: p.is_captain,
            is_leader: p.is_leader,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub id: i64,
    pub name: String,
    pub total_points: i32,
}

impl From<&Team> for TeamView {
    fn from(t: &Team) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            total_points: t.total_points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: i64,
    pub game_type_id: i64,
    pub round_no: i16,
    pub picked_by_team_id: i64,
    pub status: GameStatus,
    pub winning_team_id: Option<i64>,
    pub winner_points: Option<i32>,
    pub loser_points: Option<i32>,
    pub titles_computed: bool,
    pub reveal_index: i16,
    pub lock_version: i32,
}

impl From<&Game> for GameView {
    fn from(g: &Game) -> Self {
        Self {
            id: g.id,
            game_type_id: g.game_type_id,
            round_no: g.round_no,
            picked_by_team_id: g.picked_by_team_id,
            status: g.status,
            winning_team_id: g.winning_team_id,
            winner_points: g.winner_points,
            loser_points: g.loser_points,
            titles_computed: g.titles_computed,
            reveal_index: g.reveal_index,
            lock_version: g.lock_version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleView {
    pub id: i64,
    pub player_id: i64,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub comedic: bool,
}

impl From<&Title> for TitleView {
    fn from(t: &Title) -> Self {
        Self {
            id: t.id,
            player_id: t.player_id,
            name: t.name.clone(),
            description: t.description.clone(),
            points: t.points,
            comedic: t.comedic,
        }
    }
}
