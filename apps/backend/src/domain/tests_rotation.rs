use super::rotation::{derive_pick_state, PickedGame, RotationPhase};
use super::tiebreak::DiceRoll;

const TEAM_A: i64 = 10;
const TEAM_B: i64 = 20;

fn a_wins() -> DiceRoll {
    DiceRoll {
        team_a_roll: 5,
        team_b_roll: 2,
    }
}

fn pick(game_type_id: i64, round_no: i16, team: i64) -> PickedGame {
    PickedGame {
        game_type_id,
        round_no,
        picked_by_team_id: team,
    }
}

#[test]
fn no_roll_means_awaiting_tie_break() {
    let state = derive_pick_state(5, (TEAM_A, TEAM_B), None, vec![], &[1, 2, 3]);
    assert_eq!(state.phase, RotationPhase::AwaitingTieBreak);
    assert_eq!(state.available_game_type_ids, vec![1, 2, 3]);
    assert_eq!(state.current_pick_team(), None);
}

#[test]
fn tie_break_winner_picks_round_one() {
    let state = derive_pick_state(5, (TEAM_A, TEAM_B), Some(a_wins()), vec![], &[1, 2, 3]);
    assert_eq!(
        state.phase,
        RotationPhase::Picking {
            team_id: TEAM_A,
            round_no: 1
        }
    );
}

#[test]
fn picked_game_leaves_the_catalog_and_turn_alternates() {
    // Catalog {X=1, Y=2, Z=3}; Team A picks X for round 1.
    let state = derive_pick_state(
        5,
        (TEAM_A, TEAM_B),
        Some(a_wins()),
        vec![pick(1, 1, TEAM_A)],
        &[1, 2, 3],
    );
    assert_eq!(state.available_game_type_ids, vec![2, 3]);
    assert_eq!(
        state.phase,
        RotationPhase::Picking {
            team_id: TEAM_B,
            round_no: 2
        }
    );
    assert!(!state.is_available(1));
    assert!(state.is_available(2));
}

#[test]
fn alternation_holds_across_many_rounds() {
    let mut picked = Vec::new();
    for round in 1..=4i16 {
        let state = derive_pick_state(
            5,
            (TEAM_A, TEAM_B),
            Some(a_wins()),
            picked.clone(),
            &[1, 2, 3, 4, 5],
        );
        let team = state.current_pick_team().unwrap();
        let expected = if round % 2 == 1 { TEAM_A } else { TEAM_B };
        assert_eq!(team, expected, "round {round}");
        assert_eq!(state.current_round(), Some(round));
        picked.push(pick(round as i64, round, team));
    }
}

#[test]
fn rotation_exhausts_after_num_games() {
    let picked = vec![
        pick(1, 1, TEAM_A),
        pick(2, 2, TEAM_B),
        pick(3, 3, TEAM_A),
    ];
    let state = derive_pick_state(3, (TEAM_A, TEAM_B), Some(a_wins()), picked, &[1, 2, 3, 4]);
    assert_eq!(state.phase, RotationPhase::Exhausted);
    assert_eq!(state.current_pick_team(), None);
    assert_eq!(state.available_game_type_ids, vec![4]);
}

#[test]
fn unsorted_rows_are_ordered_by_round() {
    let picked = vec![pick(2, 2, TEAM_B), pick(1, 1, TEAM_A)];
    let state = derive_pick_state(5, (TEAM_A, TEAM_B), Some(a_wins()), picked, &[1, 2, 3]);
    assert_eq!(state.picked[0].round_no, 1);
    assert_eq!(state.picked[1].round_no, 2);
    assert_eq!(
        state.phase,
        RotationPhase::Picking {
            team_id: TEAM_A,
            round_no: 3
        }
    );
}
