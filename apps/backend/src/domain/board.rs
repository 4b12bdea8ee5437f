//! Board geometry: the shared 52-square ring and each color's private safe path.
//!
//! Positions are absolute integers. On the ring they run 1..=52; once a token
//! turns off at its gate it keeps counting upwards (`gate..=home`) and the
//! token's `is_safe_path` flag disambiguates the overlap with ring squares.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Token;

/// Number of squares on the shared ring.
pub const RING_SIZE: u8 = 52;

/// Largest single die value.
pub const DIE_FACES: u8 = 6;

/// Die value required to bring a token onto the board.
pub const ACTIVATION_ROLL: u8 = 6;

/// Position stored for a token sitting in its home yard.
pub const YARD_POSITION: u8 = 0;

/// The four token colors. Doubles as the index into per-color collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Blue => 3,
        }
    }

    /// Square a freshly activated token is placed on.
    #[inline]
    pub const fn start_square(self) -> u8 {
        match self {
            Color::Red => 2,
            Color::Green => 15,
            Color::Yellow => 28,
            Color::Blue => 41,
        }
    }

    /// First square of the safe path; a projection reaching it leaves the ring.
    #[inline]
    pub const fn gate(self) -> u8 {
        match self {
            Color::Red => 53,
            Color::Green => 14,
            Color::Yellow => 27,
            Color::Blue => 40,
        }
    }

    /// Final square of the safe path. Landing exactly here finishes a token.
    #[inline]
    pub const fn home_position(self) -> u8 {
        match self {
            Color::Red => 58,
            Color::Green => 19,
            Color::Yellow => 32,
            Color::Blue => 45,
        }
    }

    /// Last ring square before the gate.
    #[inline]
    pub const fn last_ring_square(self) -> u8 {
        self.gate() - 1
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of projecting a token forward by one die value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub position: u8,
    pub will_be_safe: bool,
}

/// Project `token` forward by `die` squares.
///
/// Safe-path tokens move in a straight line. Ring tokens either cross their
/// color's gate onto the safe path or wrap around the ring. Red's gate check
/// is a plain threshold because red starts at square 2 and never wraps; every
/// other color needs the approach-side guard so a token that has only just
/// left its start square is not mistaken for one arriving at the gate.
pub fn project_position(token: &Token, die: u8) -> Projection {
    if token.is_safe_path {
        return Projection {
            position: token.position + die,
            will_be_safe: true,
        };
    }

    let current = token.position;
    let projected = current + die;
    if crosses_gate(token.color, current, projected) {
        return Projection {
            position: projected,
            will_be_safe: true,
        };
    }

    let position = if projected > RING_SIZE {
        projected % RING_SIZE
    } else {
        projected
    };
    Projection {
        position,
        will_be_safe: false,
    }
}

fn crosses_gate(color: Color, current: u8, projected: u8) -> bool {
    match color {
        Color::Red => projected >= Color::Red.gate(),
        other => current < other.gate() && projected >= other.gate(),
    }
}

/// Remaining squares a token must travel to finish.
///
/// Ring tokens count the ring squares left before the gate plus the whole safe
/// path; safe-path tokens count only what is left of it. Yard tokens are
/// measured from their start square.
pub fn distance_to_home(token: &Token) -> u8 {
    let color = token.color;
    let safe_len = color.home_position() - color.last_ring_square();
    if token.is_finished {
        return 0;
    }
    if token.is_safe_path {
        return color.home_position().saturating_sub(token.position);
    }
    let position = if token.active {
        token.position
    } else {
        color.start_square()
    };
    let ring_left =
        (i16::from(color.last_ring_square()) - i16::from(position)).rem_euclid(i16::from(RING_SIZE));
    ring_left as u8 + safe_len
}

/// Ring squares `1..=steps` behind `position`, nearest first, wrapping at 1.
pub fn squares_behind(position: u8, steps: u8) -> impl Iterator<Item = u8> {
    (1..=steps).map(move |k| {
        let zero_based = i16::from(position) - 1 - i16::from(k);
        (zero_based.rem_euclid(i16::from(RING_SIZE)) + 1) as u8
    })
}
