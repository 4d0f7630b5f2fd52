use super::draft::{
    captain_ids, derive_draft_phase, next_draft_turn, unassigned_eligible, DraftPhase,
    RosterPlayer,
};
use crate::entities::players::PlayerRole;

fn player(id: i64, team_id: Option<i64>, is_captain: bool) -> RosterPlayer {
    RosterPlayer {
        id,
        role: PlayerRole::Player,
        team_id,
        is_captain,
    }
}

fn referee(id: i64) -> RosterPlayer {
    RosterPlayer {
        id,
        role: PlayerRole::Referee,
        team_id: None,
        is_captain: false,
    }
}

#[test]
fn empty_roster_is_captain_select() {
    assert_eq!(derive_draft_phase(&[]), DraftPhase::CaptainSelect);
}

#[test]
fn one_captain_is_still_captain_select() {
    let roster = vec![
        referee(1),
        player(2, Some(10), true),
        player(3, None, false),
        player(4, None, false),
    ];
    assert_eq!(derive_draft_phase(&roster), DraftPhase::CaptainSelect);
}

#[test]
fn captain_without_team_does_not_count() {
    let roster = vec![player(2, Some(10), true), player(3, None, true)];
    assert_eq!(derive_draft_phase(&roster), DraftPhase::CaptainSelect);
}

#[test]
fn six_player_draft_completes_after_fourth_pick() {
    // P1 and P2 captain teams 10 and 20; P3..P6 get drafted alternately.
    let mut roster = vec![
        referee(99),
        player(1, Some(10), true),
        player(2, Some(20), true),
        player(3, None, false),
        player(4, None, false),
        player(5, None, false),
        player(6, None, false),
    ];
    assert_eq!(derive_draft_phase(&roster), DraftPhase::Drafting);

    let picks = [(3, 10), (4, 20), (5, 10), (6, 20)];
    for (i, (pid, team)) in picks.iter().enumerate() {
        let slot = roster.iter_mut().find(|p| p.id == *pid).unwrap();
        slot.team_id = Some(*team);
        let expected = if i == picks.len() - 1 {
            DraftPhase::Complete
        } else {
            DraftPhase::Drafting
        };
        assert_eq!(derive_draft_phase(&roster), expected, "after pick {}", i + 1);
    }
    assert!(unassigned_eligible(&roster).is_empty());
}

#[test]
fn two_player_tournament_skips_drafting() {
    // Both players become captains and there is nobody left to draft.
    let roster = vec![
        referee(99),
        player(1, Some(10), true),
        player(2, Some(20), true),
    ];
    assert_eq!(derive_draft_phase(&roster), DraftPhase::Complete);
}

#[test]
fn spectators_are_never_draft_eligible() {
    let roster = vec![
        player(1, Some(10), true),
        player(2, Some(20), true),
        RosterPlayer {
            id: 3,
            role: PlayerRole::Spectator,
            team_id: None,
            is_captain: false,
        },
    ];
    assert!(unassigned_eligible(&roster).is_empty());
    assert_eq!(derive_draft_phase(&roster), DraftPhase::Complete);
}

#[test]
fn turn_alternates_between_captains() {
    let roster = vec![
        player(1, Some(10), true),
        player(2, Some(20), true),
        player(3, None, false),
    ];
    assert_eq!(captain_ids(&roster), vec![1, 2]);
    assert_eq!(next_draft_turn(&roster, 1), Some(2));
    assert_eq!(next_draft_turn(&roster, 2), Some(1));
}

#[test]
fn turn_for_non_captain_is_none() {
    let roster = vec![
        player(1, Some(10), true),
        player(2, Some(20), true),
        player(3, None, false),
    ];
    assert_eq!(next_draft_turn(&roster, 3), None);
}

#[test]
fn turn_with_missing_captain_is_none() {
    let roster = vec![player(1, Some(10), true), player(3, None, false)];
    assert_eq!(next_draft_turn(&roster, 1), None);
}
