use crate::domain::test_state_helpers::{
    finish, place, place_safe, two_player_game, with_roll, BLUE_YELLOW, RED_GREEN,
};
use crate::domain::{apply_move, project_position, Color, GameStatus, MoveCommand, Token};
use crate::errors::domain::DomainError;

fn cmd(
    color: Color,
    serial: u8,
    final_position: u8,
    dice: &[u8],
    roll: &[u8],
    safe: bool,
) -> MoveCommand {
    MoveCommand {
        color,
        token_serial: serial,
        final_position,
        consumed_dice: dice.to_vec(),
        all_available_dice: roll.to_vec(),
        will_land_on_safe_path: safe,
    }
}

#[test]
fn missing_token_is_the_only_failure() {
    let state = with_roll(two_player_game(), &[3]);
    let err = apply_move(&state, &cmd(Color::Red, 9, 5, &[3], &[3], false)).unwrap_err();
    assert_eq!(
        err,
        DomainError::TokenNotFound {
            color: Color::Red,
            serial: 9
        }
    );
}

#[test]
fn red_from_48_with_six_enters_safe_path() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 48);
    let state = with_roll(state, &[6, 1]);

    let token = *state.tokens.find(Color::Red, 1).unwrap();
    let p = project_position(&token, 6);
    assert_eq!(p.position, 54);
    assert!(p.will_be_safe);
    assert_eq!(p.position - 52, 2);
    assert!(p.position <= Color::Red.home_position());

    let res = apply_move(&state, &cmd(Color::Red, 1, p.position, &[6], &[6, 1], true)).unwrap();
    let moved = res.state.tokens.find(Color::Red, 1).unwrap();
    assert!(moved.is_safe_path);
    assert!(!moved.is_finished);
    assert_eq!(moved.position, 54);
    assert!(res.captured.is_empty());
}

#[test]
fn green_captures_red_and_is_promoted_home() {
    let mut state = two_player_game();
    // Reseat so red belongs to the opponent of the green mover.
    state.players[0].colors = [Color::Green, Color::Yellow];
    state.players[1].colors = [Color::Red, Color::Blue];
    place(&mut state, Color::Green, 1, 20);
    place(&mut state, Color::Red, 2, 22);
    let state = with_roll(state, &[2]);

    let res = apply_move(&state, &cmd(Color::Green, 1, 22, &[2], &[2], false)).unwrap();

    assert_eq!(res.captured.len(), 1);
    assert_eq!(res.captured[0].color, Color::Red);
    assert!(res.promoted);

    let green = res.state.tokens.find(Color::Green, 1).unwrap();
    assert_eq!(green.position, Color::Green.home_position());
    assert!(green.is_finished && green.is_safe_path && green.active);

    let red = res.state.tokens.find(Color::Red, 2).unwrap();
    assert_eq!(*red, Token::in_yard(Color::Red, 2));

    let mover = res.state.player(RED_GREEN).unwrap();
    assert_eq!(mover.captures, 1);
    assert_eq!(mover.finishes, 1);
}

#[test]
fn capture_hits_every_opposing_color_on_the_square() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 30);
    place(&mut state, Color::Blue, 1, 33);
    place(&mut state, Color::Blue, 2, 33);
    place(&mut state, Color::Yellow, 3, 33);
    place_safe(&mut state, Color::Yellow, 4, 30);
    let state = with_roll(state, &[3, 4]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 33, &[3], &[3, 4], false)).unwrap();

    assert_eq!(res.captured.len(), 3);
    assert!(res
        .state
        .tokens
        .all()
        .filter(|t| t.color != Color::Red)
        .all(|t| !(t.is_on_ring() && t.position == 33)));
    // One capturing move counts once.
    assert_eq!(res.state.player(RED_GREEN).unwrap().captures, 1);
    // Yellow 4 sits on its safe path and is untouched.
    assert!(res.state.tokens.find(Color::Yellow, 4).unwrap().active);
}

#[test]
fn own_colors_are_never_captured() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 30);
    place(&mut state, Color::Green, 1, 33);
    let state = with_roll(state, &[3]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 33, &[3], &[3], false)).unwrap();
    assert!(res.captured.is_empty());
    assert!(res.state.tokens.find(Color::Green, 1).unwrap().active);
    assert_eq!(res.state.tokens.find(Color::Red, 1).unwrap().position, 33);
}

#[test]
fn safe_landing_never_captures() {
    let mut state = two_player_game();
    // Green safe path is 14..=19; blue shares the number 17 out on the ring.
    place_safe(&mut state, Color::Green, 1, 15);
    place(&mut state, Color::Blue, 1, 17);
    let state = with_roll(state, &[2]);

    let res = apply_move(&state, &cmd(Color::Green, 1, 17, &[2], &[2], true)).unwrap();
    assert!(res.captured.is_empty());
    assert!(!res.promoted);
    assert_eq!(res.state.tokens.find(Color::Blue, 1).unwrap().position, 17);
}

#[test]
fn activation_onto_occupied_start_square_captures() {
    let mut state = two_player_game();
    place(&mut state, Color::Blue, 1, Color::Red.start_square());
    let state = with_roll(state, &[6, 2]);

    let res = apply_move(
        &state,
        &cmd(Color::Red, 3, Color::Red.start_square(), &[6], &[6, 2], false),
    )
    .unwrap();
    assert_eq!(res.captured.len(), 1);
    assert!(res.state.tokens.find(Color::Red, 3).unwrap().is_finished);
}

#[test]
fn direct_finish_counts_once() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 52);
    place(&mut state, Color::Red, 2, 10);
    let state = with_roll(state, &[6, 1]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 58, &[6], &[6, 1], true)).unwrap();
    assert!(res.token_finished);
    assert!(!res.promoted);
    let mover = res.state.player(RED_GREEN).unwrap();
    assert_eq!(mover.finishes, 1);
    assert_eq!(mover.captures, 0);
    // Die 1 is still usable by red 2, so the turn continues.
    assert!(!res.turn_over);
    assert_eq!(res.state.status, GameStatus::Moving);
    assert_eq!(res.state.used_dice_values, vec![6]);
}

#[test]
fn last_token_home_wins_without_turn_over() {
    let mut state = two_player_game();
    for serial in 1..=4 {
        finish(&mut state, Color::Green, serial);
    }
    for serial in 1..=3 {
        finish(&mut state, Color::Red, serial);
    }
    place_safe(&mut state, Color::Red, 4, 56);
    let state = with_roll(state, &[2, 5]);

    let res = apply_move(&state, &cmd(Color::Red, 4, 58, &[2], &[2, 5], true)).unwrap();

    assert_eq!(res.state.status, GameStatus::Finished);
    assert_eq!(res.state.winner, Some(RED_GREEN));
    assert_eq!(res.winner, Some(RED_GREEN));
    assert!(!res.turn_over);
    assert!(!res.bonus_turn);
    // Turn bookkeeping is left exactly as it was.
    assert_eq!(res.state.current_turn, Some(RED_GREEN));
    assert_eq!(res.state.dice_roll, vec![2, 5]);
}

#[test]
fn consuming_all_dice_hands_the_turn_over() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    let state = with_roll(state, &[4]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 14, &[4], &[4], false)).unwrap();
    assert!(res.turn_over);
    assert_eq!(res.state.status, GameStatus::Rolling);
    assert_eq!(res.state.current_turn, Some(BLUE_YELLOW));
    assert!(res.state.dice_roll.is_empty());
    assert!(res.state.used_dice_values.is_empty());
}

#[test]
fn stuck_player_forfeits_remaining_dice() {
    let mut state = two_player_game();
    // Only red 1 is out; a leftover 5 has nowhere to go once it finishes.
    place(&mut state, Color::Red, 1, 52);
    let state = with_roll(state, &[6, 5]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 58, &[6], &[6, 5], true)).unwrap();
    assert!(res.turn_over);
    assert_eq!(res.state.current_turn, Some(BLUE_YELLOW));
    assert_eq!(res.state.status, GameStatus::Rolling);
}

#[test]
fn double_six_keeps_the_turn() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 16);
    let mut state = with_roll(state, &[6, 6]);
    state.used_dice_values = vec![6];

    let res = apply_move(&state, &cmd(Color::Red, 1, 22, &[6], &[6, 6], false)).unwrap();
    assert!(res.turn_over);
    assert!(res.bonus_turn);
    assert_eq!(res.state.current_turn, Some(RED_GREEN));
    assert_eq!(res.state.status, GameStatus::Rolling);
}

#[test]
fn pinned_dice_are_cleared_after_a_move() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    let mut state = with_roll(state, &[3, 2]);
    state.active_dice_config = Some(vec![3]);

    let res = apply_move(&state, &cmd(Color::Red, 1, 13, &[3], &[3, 2], false)).unwrap();
    assert_eq!(res.state.active_dice_config, None);
}

#[test]
fn input_state_is_untouched() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    place(&mut state, Color::Blue, 1, 13);
    let state = with_roll(state, &[3]);
    let snapshot = state.clone();

    let _ = apply_move(&state, &cmd(Color::Red, 1, 13, &[3], &[3], false)).unwrap();
    assert_eq!(state, snapshot);
    assert_eq!(state.tokens.find(Color::Blue, 1).unwrap().position, 13);
}
