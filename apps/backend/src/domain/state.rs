use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::{Color, Token, TokenBoard};
use crate::errors::domain::DomainError;

pub type PlayerId = i64;
pub type GameId = i64;

/// Players needed before the first roll.
pub const PLAYERS: usize = 2;

/// Color pairs handed out in join order.
pub const COLOR_PAIRS: [[Color; 2]; PLAYERS] = [[Color::Red, Color::Green], [Color::Blue, Color::Yellow]];

/// Overall game progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Waiting for the second player.
    Waiting,
    /// Acting player must roll.
    Rolling,
    /// Acting player must spend rolled dice.
    Moving,
    /// Terminal.
    Finished,
}

impl GameStatus {
    /// Statuses in which somebody is expected to act.
    #[inline]
    pub fn is_actionable(self) -> bool {
        matches!(self, GameStatus::Rolling | GameStatus::Moving)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Rolling => "rolling",
            GameStatus::Moving => "moving",
            GameStatus::Finished => "finished",
        })
    }
}

/// Heuristic strength of an automated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Who sits behind a player seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Ai {
        /// Registered AI or advisor name.
        registry_name: String,
        difficulty: Difficulty,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<JsonValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub colors: [Color; 2],
    pub captures: u32,
    pub finishes: u32,
    pub kind: PlayerKind,
}

impl Player {
    #[inline]
    pub fn controls(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    #[inline]
    pub fn is_automated(&self) -> bool {
        matches!(self.kind, PlayerKind::Ai { .. })
    }

    /// Colors held by the other side.
    pub fn opponent_colors(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(move |c| !self.controls(*c))
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: GameStatus,
    pub players: Vec<Player>,
    /// Player expected to act; `None` before the game starts.
    pub current_turn: Option<PlayerId>,
    /// One or two values; empty while waiting for a roll.
    pub dice_roll: Vec<u8>,
    /// Sub-multiset of `dice_roll` already spent this turn.
    pub used_dice_values: Vec<u8>,
    /// Dice the acting player pinned for their next move.
    pub active_dice_config: Option<Vec<u8>>,
    pub tokens: TokenBoard,
    pub winner: Option<PlayerId>,
    /// Exclusive-processing flag owned by the AI coordinator.
    pub processing: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            status: GameStatus::Waiting,
            players: Vec::with_capacity(PLAYERS),
            current_turn: None,
            dice_roll: Vec::new(),
            used_dice_values: Vec::new(),
            active_dice_config: None,
            tokens: TokenBoard::new(),
            winner: None,
            processing: false,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn require_player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.player(id)
            .ok_or(DomainError::UnknownPlayer { player_id: id })
    }

    /// Player owning `color`, if seated.
    pub fn owner_of(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.controls(color))
    }

    /// Player whose turn it is.
    pub fn acting_player(&self) -> Option<&Player> {
        self.current_turn.and_then(|id| self.player(id))
    }

    /// Round-robin successor of `id` in seating order.
    pub fn next_player_after(&self, id: PlayerId) -> Option<PlayerId> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let next = (idx + 1) % self.players.len();
        Some(self.players[next].id)
    }

    /// Tokens of both colors a player controls.
    pub fn tokens_of<'a>(&'a self, player: &'a Player) -> impl Iterator<Item = &'a Token> + 'a {
        player
            .colors
            .iter()
            .flat_map(move |c| self.tokens.of(*c).iter())
    }

    /// Rolled values not yet spent this turn.
    pub fn remaining_dice(&self) -> Vec<u8> {
        multiset_difference(&self.dice_roll, &self.used_dice_values)
    }

    /// Capturable opposing tokens (active, on the ring) sitting on `position`.
    pub fn opponents_at(&self, mover: &Player, position: u8) -> Vec<Token> {
        mover
            .opponent_colors()
            .flat_map(|c| self.tokens.of(c).iter())
            .filter(|t| t.is_on_ring() && t.position == position)
            .copied()
            .collect()
    }

    /// Close the current turn: clear dice and hand over (or keep, on a bonus).
    pub fn end_turn(&mut self, bonus_turn: bool) {
        self.dice_roll.clear();
        self.used_dice_values.clear();
        self.active_dice_config = None;
        self.status = GameStatus::Rolling;
        if !bonus_turn {
            self.current_turn = self
                .current_turn
                .and_then(|id| self.next_player_after(id))
                .or(self.current_turn);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// `whole` minus one occurrence per element of `part`.
pub fn multiset_difference(whole: &[u8], part: &[u8]) -> Vec<u8> {
    let mut rest = whole.to_vec();
    for v in part {
        if let Some(pos) = rest.iter().position(|r| r == v) {
            rest.swap_remove(pos);
        }
    }
    rest.sort_unstable();
    rest
}

/// True when every element of `part` can be matched in `whole`.
pub fn is_sub_multiset(part: &[u8], whole: &[u8]) -> bool {
    let mut rest = whole.to_vec();
    part.iter().all(|v| match rest.iter().position(|r| r == v) {
        Some(pos) => {
            rest.swap_remove(pos);
            true
        }
        None => false,
    })
}

/// Double six grants a whole extra turn.
#[inline]
pub fn is_double_six(roll: &[u8]) -> bool {
    roll.len() == 2 && roll.iter().all(|v| *v == 6)
}
