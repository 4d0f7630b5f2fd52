use proptest::prelude::*;

use super::reveal::next_reveal_index;
use super::rotation::{derive_pick_state, PickedGame, RotationPhase};
use super::tiebreak::DiceRoll;

const TEAM_A: i64 = 10;
const TEAM_B: i64 = 20;

fn arb_roll() -> impl Strategy<Value = DiceRoll> {
    (1u8..=6, 1u8..=6)
        .prop_filter("ties are rerolled at source", |(a, b)| a != b)
        .prop_map(|(team_a_roll, team_b_roll)| DiceRoll {
            team_a_roll,
            team_b_roll,
        })
}

proptest! {
    /// Consecutive rounds are never picked by the same team.
    #[test]
    fn pickers_strictly_alternate(roll in arb_roll(), num_games in 1i16..=10) {
        let catalog: Vec<i64> = (1..=num_games as i64).collect();
        let mut picked: Vec<PickedGame> = Vec::new();
        let mut last_team: Option<i64> = None;

        loop {
            let state = derive_pick_state(
                num_games,
                (TEAM_A, TEAM_B),
                Some(roll),
                picked.clone(),
                &catalog,
            );
            let (team_id, round_no) = match state.phase {
                RotationPhase::Picking { team_id, round_no } => (team_id, round_no),
                RotationPhase::Exhausted => break,
                RotationPhase::AwaitingTieBreak => {
                    prop_assert!(false, "roll is present");
                    unreachable!()
                }
            };
            if let Some(last) = last_team {
                prop_assert_ne!(team_id, last, "round {}", round_no);
            }
            last_team = Some(team_id);
            let game_type_id = state.available_game_type_ids[0];
            picked.push(PickedGame {
                game_type_id,
                round_no,
                picked_by_team_id: team_id,
            });
        }
        prop_assert_eq!(picked.len() as i16, num_games);
    }

    /// Round 1 always belongs to the tie-break winner.
    #[test]
    fn round_one_belongs_to_the_roll_winner(roll in arb_roll()) {
        let state = derive_pick_state(3, (TEAM_A, TEAM_B), Some(roll), vec![], &[1, 2, 3]);
        let winner = roll.first_pick_team(TEAM_A, TEAM_B);
        prop_assert_eq!(
            state.phase,
            RotationPhase::Picking { team_id: winner, round_no: 1 }
        );
    }

    /// No picked game ever reappears in the available set.
    #[test]
    fn picked_games_never_reappear(
        roll in arb_roll(),
        n_picked in 0usize..=4,
    ) {
        let catalog: Vec<i64> = (1..=6).collect();
        let picked: Vec<PickedGame> = (0..n_picked)
            .map(|i| PickedGame {
                game_type_id: i as i64 + 1,
                round_no: i as i16 + 1,
                picked_by_team_id: if i % 2 == 0 { TEAM_A } else { TEAM_B },
            })
            .collect();
        let state = derive_pick_state(6, (TEAM_A, TEAM_B), Some(roll), picked.clone(), &catalog);
        for p in &picked {
            prop_assert!(!state.available_game_type_ids.contains(&p.game_type_id));
        }
        prop_assert_eq!(
            state.available_game_type_ids.len() + picked.len(),
            catalog.len()
        );
    }

    /// The reveal cursor only ever moves forward by exactly one.
    #[test]
    fn reveal_index_is_monotonic(total in 0usize..=8, current in 0i16..=8) {
        match next_reveal_index(current, total) {
            Ok(next) => {
                prop_assert_eq!(next, current + 1);
                prop_assert!((next as usize) <= total);
            }
            Err(_) => {
                prop_assert!(current < 0 || current as usize >= total);
            }
        }
    }
}
