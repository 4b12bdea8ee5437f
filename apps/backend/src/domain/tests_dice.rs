use crate::domain::test_state_helpers::{
    finish, place, place_safe, two_player_game, with_roll, BLUE_YELLOW, RED_GREEN,
};
use crate::domain::{begin_turn, roll_dice, Color, GameState, GameStatus, ScriptedDice};
use crate::errors::domain::DomainError;

#[test]
fn usable_roll_moves_into_moving_phase() {
    let mut state = two_player_game();
    place(&mut state, Color::Green, 1, 30);

    let outcome = begin_turn(&mut state, vec![3, 5]).unwrap();

    assert!(!outcome.forfeited);
    assert_eq!(outcome.usable, vec![3, 5]);
    assert_eq!(state.status, GameStatus::Moving);
    assert_eq!(state.dice_roll, vec![3, 5]);
    assert!(state.used_dice_values.is_empty());
    assert_eq!(state.current_turn, Some(RED_GREEN));
}

#[test]
fn only_usable_values_are_reported() {
    let mut state = two_player_game();
    // Red 1 sits three squares from home on its safe path.
    place_safe(&mut state, Color::Red, 1, 55);

    let outcome = begin_turn(&mut state, vec![2, 5]).unwrap();
    assert_eq!(outcome.usable, vec![2]);
    assert_eq!(state.status, GameStatus::Moving);
}

#[test]
fn unusable_roll_forfeits_the_turn() {
    let mut state = two_player_game();

    let outcome = begin_turn(&mut state, vec![2, 4]).unwrap();

    assert!(outcome.forfeited);
    assert!(!outcome.bonus_turn);
    assert_eq!(state.status, GameStatus::Rolling);
    assert_eq!(state.current_turn, Some(BLUE_YELLOW));
    assert!(state.dice_roll.is_empty());
}

#[test]
fn useless_double_six_still_grants_a_bonus() {
    let mut state = two_player_game();
    for serial in 1..=4 {
        finish(&mut state, Color::Red, serial);
        // One square from home, a six overshoots.
        place_safe(&mut state, Color::Green, serial, 18);
    }

    let outcome = begin_turn(&mut state, vec![6, 6]).unwrap();
    assert!(outcome.forfeited);
    assert!(outcome.bonus_turn);
    assert_eq!(state.current_turn, Some(RED_GREEN));
    assert_eq!(state.status, GameStatus::Rolling);
}

#[test]
fn rolling_twice_is_a_phase_mismatch() {
    let mut state = with_roll(two_player_game(), &[3]);
    let err = begin_turn(&mut state, vec![4]).unwrap_err();
    assert_eq!(
        err,
        DomainError::PhaseMismatch {
            expected: GameStatus::Rolling,
            actual: GameStatus::Moving
        }
    );
    assert_eq!(state.dice_roll, vec![3]);
}

#[test]
fn rolling_before_start_is_rejected() {
    let mut state = GameState::new();
    assert!(matches!(
        begin_turn(&mut state, vec![6]),
        Err(DomainError::PhaseMismatch { .. })
    ));
}

#[test]
fn single_die_games_roll_one_value() {
    let dice = ScriptedDice::new(vec![6]).unwrap();
    let mut state = two_player_game();
    let outcome = begin_turn(&mut state, roll_dice(&dice, 1)).unwrap();
    assert_eq!(outcome.roll, vec![6]);
    assert_eq!(state.status, GameStatus::Moving);
}
