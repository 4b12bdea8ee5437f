use crate::domain::legality::{can_move, command_for, player_can_use};
use crate::domain::test_state_helpers::{finish, place, place_safe, two_player_game, with_roll};
use crate::domain::{
    is_die_usable, legal_moves, movable_tokens, plan_move, Color, Move, PlannedMove, Token,
};
use crate::errors::domain::DomainError;

fn ring(color: Color, position: u8) -> Token {
    Token {
        active: true,
        position,
        ..Token::in_yard(color, 1)
    }
}

#[test]
fn yard_tokens_need_a_six() {
    let yard = Token::in_yard(Color::Blue, 1);
    assert!(!can_move(&yard, 5));
    assert!(can_move(&yard, 6));
}

#[test]
fn finished_tokens_never_move() {
    let mut state = two_player_game();
    finish(&mut state, Color::Red, 1);
    let token = *state.tokens.find(Color::Red, 1).unwrap();
    for die in 1..=6 {
        assert!(!can_move(&token, die));
    }
}

#[test]
fn overshoot_is_only_checked_on_the_safe_path() {
    let mut safe = ring(Color::Green, 17);
    safe.is_safe_path = true;
    assert!(can_move(&safe, 2));
    assert!(!can_move(&safe, 3));

    // Red at 55 on the safe path; home is 58.
    let mut red = ring(Color::Red, 55);
    red.is_safe_path = true;
    assert!(can_move(&red, 3));
    assert!(!can_move(&red, 4));

    // Green on the open ring far from its gate can move anything.
    let open = ring(Color::Green, 40);
    assert!((1..=6).all(|d| can_move(&open, d)));
}

#[test]
fn entering_the_safe_path_past_home_is_rejected() {
    // Yellow at 25: gate 27, home 32. 25 + 6 = 31 is fine.
    assert!(can_move(&ring(Color::Yellow, 25), 6));
    // Blue at 38 + 6 = 44 <= 45.
    assert!(can_move(&ring(Color::Blue, 38), 6));
    // Red at 52 + 6 = 58 exactly home.
    assert!(can_move(&ring(Color::Red, 52), 6));
}

#[test]
fn die_usability_follows_movable_subset() {
    let tokens = [
        Token::in_yard(Color::Red, 1),
        Token::in_yard(Color::Red, 2),
        Token::in_yard(Color::Red, 3),
        Token::in_yard(Color::Red, 4),
    ];
    assert!(movable_tokens(4, &tokens).is_empty());
    assert!(!is_die_usable(4, &tokens));
    assert_eq!(movable_tokens(6, &tokens).len(), 4);
    assert!(is_die_usable(6, &tokens));
}

#[test]
fn legal_moves_cover_both_colors_and_dedupe_dice() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    place(&mut state, Color::Green, 2, 30);
    let state = with_roll(state, &[3, 3]);
    let player = state.player(1).unwrap().clone();

    let moves = legal_moves(&state, &player);
    assert_eq!(
        moves,
        vec![
            Move {
                color: Color::Red,
                token_serial: 1,
                die: 3
            },
            Move {
                color: Color::Green,
                token_serial: 2,
                die: 3
            },
        ]
    );
}

#[test]
fn legal_moves_skip_spent_dice() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    let mut state = with_roll(state, &[6, 2]);
    state.used_dice_values = vec![6];
    let player = state.player(1).unwrap().clone();

    let moves = legal_moves(&state, &player);
    assert!(moves.iter().all(|m| m.die == 2));
    assert!(player_can_use(&state, &player, 2));
}

#[test]
fn plan_activates_then_advances() {
    let yard = Token::in_yard(Color::Green, 3);
    assert_eq!(
        plan_move(&yard, &[6]).unwrap(),
        PlannedMove {
            final_position: Color::Green.start_square(),
            will_land_on_safe_path: false
        }
    );
    assert_eq!(plan_move(&yard, &[6, 4]).unwrap().final_position, 19);
    assert!(matches!(
        plan_move(&yard, &[4, 6]),
        Err(DomainError::IllegalMove(_))
    ));
}

#[test]
fn plan_rejects_overshoot_in_any_step() {
    let mut state = two_player_game();
    place_safe(&mut state, Color::Blue, 1, 42);
    let token = *state.tokens.find(Color::Blue, 1).unwrap();
    assert!(plan_move(&token, &[3]).is_ok());
    assert!(plan_move(&token, &[2, 2]).is_err());
    assert!(plan_move(&token, &[]).is_err());
}

#[test]
fn plan_finishes_exactly_on_home() {
    let token = ring(Color::Red, 52);
    let plan = plan_move(&token, &[4, 2]).unwrap();
    assert_eq!(plan.final_position, 58);
    assert!(plan.will_land_on_safe_path);
}

#[test]
fn command_carries_the_full_roll() {
    let mut state = two_player_game();
    place(&mut state, Color::Red, 1, 10);
    let state = with_roll(state, &[5, 1]);
    let token = *state.tokens.find(Color::Red, 1).unwrap();

    let cmd = command_for(&state, &token, &[5]).unwrap();
    assert_eq!(cmd.final_position, 15);
    assert_eq!(cmd.consumed_dice, vec![5]);
    assert_eq!(cmd.all_available_dice, vec![5, 1]);
    assert!(!cmd.will_land_on_safe_path);
}
