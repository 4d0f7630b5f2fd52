use super::reveal::{next_reveal_index, reveal_complete, RevealCursor, AUTO_ADVANCE_INTERVAL};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn cursor_walks_from_zero_to_total() {
    let total = 3;
    let mut index = 0i16;
    for expected in 1..=3i16 {
        index = next_reveal_index(index, total).unwrap();
        assert_eq!(index, expected);
    }
    assert!(reveal_complete(index, total));
}

#[test]
fn advancing_a_complete_cursor_is_out_of_range() {
    let err = next_reveal_index(2, 2).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RevealOutOfRange, _)
    ));
}

#[test]
fn negative_and_overshot_indexes_are_rejected() {
    assert!(next_reveal_index(-1, 3).is_err());
    assert!(next_reveal_index(4, 3).is_err());
}

#[test]
fn zero_titles_is_immediately_complete() {
    assert!(reveal_complete(0, 0));
    assert!(next_reveal_index(0, 0).is_err());
}

#[test]
fn auto_ticks_advance_until_complete() {
    let mut cursor = RevealCursor::new(0, 2);
    assert!(cursor.auto_advance_enabled());

    cursor = cursor.auto_tick();
    assert_eq!(cursor.index(), 1);
    cursor = cursor.auto_tick();
    assert_eq!(cursor.index(), 2);
    assert!(cursor.is_complete());

    // Further ticks hold at the end.
    assert_eq!(cursor.auto_tick().index(), 2);
}

#[test]
fn first_tap_disables_auto_advance() {
    let cursor = RevealCursor::new(0, 3).tap();
    assert_eq!(cursor.index(), 1);
    assert!(!cursor.auto_advance_enabled());

    // Timer ticks no longer move it; taps still do.
    assert_eq!(cursor.auto_tick().index(), 1);
    assert_eq!(cursor.tap().index(), 2);
}

#[test]
fn auto_advance_interval_follows_the_flag() {
    let cursor = RevealCursor::new(0, 3);
    assert_eq!(cursor.auto_advance_interval(), Some(AUTO_ADVANCE_INTERVAL));
    assert_eq!(cursor.tap().auto_advance_interval(), None);
}

#[test]
fn cursor_rehydrates_mid_reveal() {
    // A reconnecting client picks up from the shared row index.
    let cursor = RevealCursor::new(2, 4);
    assert_eq!(cursor.index(), 2);
    assert!(!cursor.is_complete());
}
