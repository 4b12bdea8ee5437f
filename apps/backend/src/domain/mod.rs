//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod dice;
pub mod game_transition;
pub mod legality;
pub mod lobby;
pub mod moves;
pub mod resolver;
pub mod state;
pub mod token;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_dice;
#[cfg(test)]
mod tests_legality;
#[cfg(test)]
mod tests_props_resolver;
#[cfg(test)]
mod tests_resolver;

// Re-exports for ergonomics
pub use board::{project_position, Color, Projection, RING_SIZE};
pub use dice::{begin_turn, roll_dice, DiceSource, RngDice, RollOutcome, ScriptedDice};
pub use legality::{is_die_usable, legal_moves, movable_tokens, plan_move, PlannedMove};
pub use lobby::join_game;
pub use moves::{Move, MoveCommand};
pub use resolver::{apply_move, Resolution};
pub use state::{Difficulty, GameId, GameState, GameStatus, Player, PlayerId, PlayerKind};
pub use token::{Token, TokenBoard};
