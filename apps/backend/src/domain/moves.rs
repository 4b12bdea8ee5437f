use serde::{Deserialize, Serialize};

use crate::domain::Color;

/// A single-die move proposed by a move selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub color: Color,
    pub token_serial: u8,
    pub die: u8,
}

/// Fully resolved move handed to [`apply_move`](crate::domain::apply_move).
///
/// Callers build it through the legality filter; the resolver trusts the
/// position and dice it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub color: Color,
    pub token_serial: u8,
    pub final_position: u8,
    pub consumed_dice: Vec<u8>,
    pub all_available_dice: Vec<u8>,
    pub will_land_on_safe_path: bool,
}
