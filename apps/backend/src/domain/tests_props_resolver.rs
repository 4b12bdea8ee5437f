/// Property-based tests for the turn resolver
use proptest::prelude::*;

use crate::domain::board::RING_SIZE;
use crate::domain::{apply_move, legal_moves, test_gens, test_prelude, GameStatus, Token};

fn token_is_consistent(t: &Token) -> bool {
    let color = t.color;
    if !t.active {
        return !t.is_safe_path && !t.is_finished;
    }
    if t.is_finished {
        return t.is_safe_path && t.position == color.home_position();
    }
    if t.is_safe_path {
        return (color.gate()..=color.home_position()).contains(&t.position);
    }
    (1..=RING_SIZE).contains(&t.position)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every legal move resolves into a consistent board.
    #[test]
    fn prop_legal_moves_keep_board_consistent(
        mut state in test_gens::game_in_progress(),
        roll in test_gens::roll(),
    ) {
        state.status = GameStatus::Moving;
        state.dice_roll = roll.clone();
        let player = state.acting_player().cloned().expect("acting player");

        for mv in legal_moves(&state, &player) {
            let cmd = mv.to_command(&state).expect("legal move plans");
            let res = apply_move(&state, &cmd).expect("legal move resolves");

            prop_assert_eq!(res.state.tokens.all().count(), 16);
            for t in res.state.tokens.all() {
                prop_assert!(token_is_consistent(t), "inconsistent {:?} after {:?}", t, mv);
            }
            if !res.turn_over && res.winner.is_none() {
                prop_assert!(res.state.used_dice_values.len() <= roll.len());
                prop_assert_eq!(res.state.status, GameStatus::Moving);
            }
        }
    }

    /// Property: a capture empties the square, scores once and promotes the mover.
    #[test]
    fn prop_capture_scores_once_and_promotes(
        mut state in test_gens::game_in_progress(),
        roll in test_gens::roll(),
    ) {
        state.status = GameStatus::Moving;
        state.dice_roll = roll;
        let player = state.acting_player().cloned().expect("acting player");

        for mv in legal_moves(&state, &player) {
            let cmd = mv.to_command(&state).expect("legal move plans");
            let victims = if cmd.will_land_on_safe_path {
                Vec::new()
            } else {
                state.opponents_at(&player, cmd.final_position)
            };
            let res = apply_move(&state, &cmd).expect("legal move resolves");
            let before = state.player(player.id).expect("seated").captures;
            let after = res.state.player(player.id).expect("seated").captures;

            prop_assert_eq!(res.captured.len(), victims.len());
            if victims.is_empty() {
                prop_assert_eq!(after, before);
                prop_assert!(!res.promoted);
            } else {
                prop_assert_eq!(after, before + 1);
                prop_assert!(res.promoted);
                let moved = res.state.tokens.find(mv.color, mv.token_serial).expect("moved token");
                prop_assert!(moved.is_finished);
                prop_assert_eq!(moved.position, mv.color.home_position());
                for v in &victims {
                    let now = res.state.tokens.find(v.color, v.serial).expect("victim");
                    prop_assert_eq!(*now, Token::in_yard(v.color, v.serial));
                }
            }
        }
    }

    /// Property: a finished token only ever counts once.
    #[test]
    fn prop_finishes_increase_by_at_most_one(
        mut state in test_gens::game_in_progress(),
        roll in test_gens::roll(),
    ) {
        state.status = GameStatus::Moving;
        state.dice_roll = roll;
        let player = state.acting_player().cloned().expect("acting player");

        for mv in legal_moves(&state, &player) {
            let cmd = mv.to_command(&state).expect("legal move plans");
            let res = apply_move(&state, &cmd).expect("legal move resolves");
            let before = state.player(player.id).expect("seated").finishes;
            let after = res.state.player(player.id).expect("seated").finishes;
            prop_assert_eq!(after - before, u32::from(res.token_finished));
        }
    }
}
