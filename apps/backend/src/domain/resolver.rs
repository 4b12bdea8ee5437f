//! Turn resolver: applies one move to a full game state.
//!
//! The resolver is pure and works on a copy, so a failed call never leaves a
//! half-applied state behind. It only checks that the token exists; legality
//! of the die/position combination is the caller's contract and is enforced
//! upstream by the legality filter.

use tracing::debug;

use crate::domain::legality::player_can_use;
use crate::domain::state::{is_double_six, multiset_difference};
use crate::domain::{Color, GameState, GameStatus, MoveCommand, PlayerId, Token};
use crate::errors::domain::DomainError;

/// Everything a caller may want to report about an applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: GameState,
    /// Owner of the moved color, when seated.
    pub mover: Option<PlayerId>,
    /// Opposing tokens sent home, as they stood before the capture.
    pub captured: Vec<Token>,
    /// The moved token is finished (directly or by kill-promotion).
    pub token_finished: bool,
    pub promoted: bool,
    pub turn_over: bool,
    pub bonus_turn: bool,
    pub winner: Option<PlayerId>,
}

pub fn apply_move(state: &GameState, cmd: &MoveCommand) -> Result<Resolution, DomainError> {
    let color = cmd.color;
    let original = *state
        .tokens
        .find(color, cmd.token_serial)
        .ok_or(DomainError::TokenNotFound {
            color,
            serial: cmd.token_serial,
        })?;

    let mut next = state.clone();
    let owner = state.owner_of(color).cloned();

    let home = color.home_position();
    let mut moved = Token {
        active: true,
        position: cmd.final_position,
        is_safe_path: cmd.will_land_on_safe_path,
        is_finished: cmd.will_land_on_safe_path && cmd.final_position == home,
        ..original
    };

    let mut captured = Vec::new();
    if !cmd.will_land_on_safe_path {
        let opponents: Vec<Color> = match &owner {
            Some(p) => p.opponent_colors().collect(),
            None => Color::ALL.into_iter().filter(|c| *c != color).collect(),
        };
        for c in opponents {
            for victim in next.tokens.of_mut(c).iter_mut() {
                if victim.is_on_ring() && victim.position == cmd.final_position {
                    captured.push(*victim);
                    victim.reset_to_yard();
                }
            }
        }
    }

    // Kill-promotion: a capturing token finishes on the spot.
    let promoted = !captured.is_empty();
    if promoted {
        moved.is_safe_path = true;
        moved.is_finished = true;
        moved.position = home;
    }

    if let Some(player) = owner.as_ref().and_then(|o| next.player_mut(o.id)) {
        if promoted {
            player.captures += 1;
        }
        if moved.is_finished {
            player.finishes += 1;
        }
    }

    if let Some(slot) = next.tokens.find_mut(color, cmd.token_serial) {
        *slot = moved;
    }

    next.used_dice_values.extend_from_slice(&cmd.consumed_dice);
    next.active_dice_config = None;

    let mover = owner.as_ref().map(|p| p.id);
    let mut resolution = Resolution {
        state: next,
        mover,
        captured,
        token_finished: moved.is_finished,
        promoted,
        turn_over: false,
        bonus_turn: false,
        winner: None,
    };

    if let Some(player) = &owner {
        let won = player
            .colors
            .iter()
            .all(|c| resolution.state.tokens.all_finished(*c));
        if won {
            resolution.state.status = GameStatus::Finished;
            resolution.state.winner = Some(player.id);
            resolution.winner = Some(player.id);
            debug!(player_id = player.id, "All tokens finished, game won");
            return Ok(resolution);
        }
    }

    let remaining = multiset_difference(&cmd.all_available_dice, &resolution.state.used_dice_values);
    let turn_over = match &owner {
        _ if remaining.is_empty() => true,
        Some(player) => !remaining
            .iter()
            .any(|d| player_can_use(&resolution.state, player, *d)),
        None => true,
    };

    if turn_over {
        let bonus = is_double_six(&cmd.all_available_dice);
        if mover.is_some() {
            resolution.state.current_turn = mover;
        }
        resolution.state.end_turn(bonus);
        resolution.bonus_turn = bonus;
    } else {
        resolution.state.status = GameStatus::Moving;
    }
    resolution.turn_over = turn_over;

    Ok(resolution)
}
