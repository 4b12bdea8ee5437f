//! Legality filter: which tokens may move for a given die value.

use crate::domain::board::{project_position, Projection, ACTIVATION_ROLL, DIE_FACES};
use crate::domain::{GameState, Move, MoveCommand, Player, Token};
use crate::errors::domain::DomainError;

/// Whether `token` may legally spend `die`.
pub fn can_move(token: &Token, die: u8) -> bool {
    if token.is_finished || !(1..=DIE_FACES).contains(&die) {
        return false;
    }
    if !token.active {
        return die == ACTIVATION_ROLL;
    }
    let Projection {
        position,
        will_be_safe,
    } = project_position(token, die);
    // Open-ring projections can never overshoot.
    !will_be_safe || position <= token.color.home_position()
}

/// Subset of `tokens` that may move with `die`.
pub fn movable_tokens(die: u8, tokens: &[Token]) -> Vec<Token> {
    tokens.iter().filter(|t| can_move(t, die)).copied().collect()
}

pub fn is_die_usable(die: u8, tokens: &[Token]) -> bool {
    tokens.iter().any(|t| can_move(t, die))
}

/// Whether any token `player` controls can spend `die`.
pub fn player_can_use(state: &GameState, player: &Player, die: u8) -> bool {
    player
        .colors
        .iter()
        .any(|c| is_die_usable(die, state.tokens.of(*c)))
}

/// Every (unused die, token) pair `player` may play, one entry per distinct die value.
pub fn legal_moves(state: &GameState, player: &Player) -> Vec<Move> {
    let mut dice = state.remaining_dice();
    dice.dedup();

    let mut moves = Vec::new();
    for die in dice {
        for color in player.colors {
            for token in movable_tokens(die, state.tokens.of(color)) {
                moves.push(Move {
                    color,
                    token_serial: token.serial,
                    die,
                });
            }
        }
    }
    moves
}

/// Where a (possibly multi-die) move ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub final_position: u8,
    pub will_land_on_safe_path: bool,
}

/// Walk `token` through `dice` in order, checking every step.
///
/// The first step of a yard token must be the activation roll and lands on the
/// start square; each later step has to be legal on its own.
pub fn plan_move(token: &Token, dice: &[u8]) -> Result<PlannedMove, DomainError> {
    if dice.is_empty() {
        return Err(DomainError::illegal("no dice selected"));
    }

    let mut walker = *token;
    for &die in dice {
        if !can_move(&walker, die) {
            return Err(DomainError::illegal(format!(
                "{} token {} cannot move {die} from {}",
                token.color, token.serial, walker.position
            )));
        }
        if walker.active {
            let p = project_position(&walker, die);
            walker.position = p.position;
            walker.is_safe_path = p.will_be_safe;
            walker.is_finished = p.will_be_safe && p.position == walker.color.home_position();
        } else {
            walker.active = true;
            walker.position = walker.color.start_square();
        }
    }

    Ok(PlannedMove {
        final_position: walker.position,
        will_land_on_safe_path: walker.is_safe_path,
    })
}

/// Resolver command for moving `token` with `dice` in the current state.
pub fn command_for(state: &GameState, token: &Token, dice: &[u8]) -> Result<MoveCommand, DomainError> {
    let plan = plan_move(token, dice)?;
    Ok(MoveCommand {
        color: token.color,
        token_serial: token.serial,
        final_position: plan.final_position,
        consumed_dice: dice.to_vec(),
        all_available_dice: state.dice_roll.clone(),
        will_land_on_safe_path: plan.will_land_on_safe_path,
    })
}

impl Move {
    /// Resolver command for this single-die move.
    pub fn to_command(&self, state: &GameState) -> Result<MoveCommand, DomainError> {
        let token = state
            .tokens
            .find(self.color, self.token_serial)
            .ok_or(DomainError::TokenNotFound {
                color: self.color,
                serial: self.token_serial,
            })?;
        command_for(state, token, &[self.die])
    }
}
