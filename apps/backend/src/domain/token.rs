use serde::{Deserialize, Serialize};

use crate::domain::board::YARD_POSITION;
use crate::domain::Color;

/// Tokens per color.
pub const TOKENS_PER_COLOR: usize = 4;

/// A single playing piece.
///
/// Invariant: a finished token is always `active` and `is_safe_path`. The
/// position of an inactive token is the yard default and carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// 1..=4, unique within a color.
    pub serial: u8,
    pub color: Color,
    pub active: bool,
    pub position: u8,
    pub is_safe_path: bool,
    pub is_finished: bool,
}

impl Token {
    pub const fn in_yard(color: Color, serial: u8) -> Self {
        Self {
            serial,
            color,
            active: false,
            position: YARD_POSITION,
            is_safe_path: false,
            is_finished: false,
        }
    }

    /// Active and still exposed on the shared ring.
    #[inline]
    pub fn is_on_ring(&self) -> bool {
        self.active && !self.is_safe_path
    }

    /// Send the token back to its yard.
    pub fn reset_to_yard(&mut self) {
        *self = Self::in_yard(self.color, self.serial);
    }
}

/// The four tokens of every color, indexed by [`Color::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBoard([[Token; TOKENS_PER_COLOR]; 4]);

impl TokenBoard {
    pub fn new() -> Self {
        Self(Color::ALL.map(|color| {
            let mut serial = 0u8;
            [(); TOKENS_PER_COLOR].map(|_| {
                serial += 1;
                Token::in_yard(color, serial)
            })
        }))
    }

    pub fn of(&self, color: Color) -> &[Token; TOKENS_PER_COLOR] {
        &self.0[color.index()]
    }

    pub fn of_mut(&mut self, color: Color) -> &mut [Token; TOKENS_PER_COLOR] {
        &mut self.0[color.index()]
    }

    pub fn find(&self, color: Color, serial: u8) -> Option<&Token> {
        self.of(color).iter().find(|t| t.serial == serial)
    }

    pub fn find_mut(&mut self, color: Color, serial: u8) -> Option<&mut Token> {
        self.of_mut(color).iter_mut().find(|t| t.serial == serial)
    }

    pub fn all(&self) -> impl Iterator<Item = &Token> {
        self.0.iter().flatten()
    }

    pub fn all_finished(&self, color: Color) -> bool {
        self.of(color).iter().all(|t| t.is_finished)
    }
}

impl Default for TokenBoard {
    fn default() -> Self {
        Self::new()
    }
}
