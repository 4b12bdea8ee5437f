//! Dice phase: random source and the start of a turn.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::prelude::*;

use crate::domain::board::DIE_FACES;
use crate::domain::legality::player_can_use;
use crate::domain::state::is_double_six;
use crate::domain::{GameState, GameStatus};
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Source of uniform die values in `1..=6`.
pub trait DiceSource: Send + Sync {
    fn roll_die(&self) -> u8;
}

/// RNG-backed dice, seedable for reproducible games.
pub struct RngDice {
    rng: Mutex<StdRng>,
}

impl RngDice {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl DiceSource for RngDice {
    fn roll_die(&self) -> u8 {
        self.rng.lock().random_range(1..=DIE_FACES)
    }
}

/// Replays a fixed script of die values, cycling when exhausted.
pub struct ScriptedDice {
    script: Vec<u8>,
    cursor: AtomicUsize,
}

impl ScriptedDice {
    /// Fails unless `script` is non-empty and every value is a die face.
    pub fn new(script: Vec<u8>) -> Result<Self, AppError> {
        if script.is_empty() {
            return Err(AppError::config("dice script must not be empty"));
        }
        if let Some(bad) = script.iter().find(|v| !(1..=DIE_FACES).contains(*v)) {
            return Err(AppError::config(format!(
                "dice script value {bad} is outside 1..=6"
            )));
        }
        Ok(Self {
            script,
            cursor: AtomicUsize::new(0),
        })
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&self) -> u8 {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.script[i % self.script.len()]
    }
}

pub fn roll_dice(source: &dyn DiceSource, count: u8) -> Vec<u8> {
    (0..count).map(|_| source.roll_die()).collect()
}

/// What a roll did to the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: Vec<u8>,
    /// Rolled values at least one controlled token can spend.
    pub usable: Vec<u8>,
    /// Nothing was usable and the turn passed on immediately.
    pub forfeited: bool,
    pub bonus_turn: bool,
}

/// Record `roll` for the acting player and move the game into `moving`.
///
/// A roll nobody can use ends the turn on the spot; a useless double six still
/// earns the bonus turn.
pub fn begin_turn(state: &mut GameState, roll: Vec<u8>) -> Result<RollOutcome, DomainError> {
    if state.status != GameStatus::Rolling {
        return Err(DomainError::PhaseMismatch {
            expected: GameStatus::Rolling,
            actual: state.status,
        });
    }
    let player = state
        .acting_player()
        .cloned()
        .ok_or_else(|| DomainError::illegal("no acting player"))?;

    state.dice_roll = roll.clone();
    state.used_dice_values.clear();
    state.active_dice_config = None;

    let usable: Vec<u8> = roll
        .iter()
        .copied()
        .filter(|d| player_can_use(state, &player, *d))
        .collect();

    let mut outcome = RollOutcome {
        roll,
        usable,
        forfeited: false,
        bonus_turn: false,
    };
    if outcome.usable.is_empty() {
        let bonus = is_double_six(&outcome.roll);
        state.end_turn(bonus);
        outcome.forfeited = true;
        outcome.bonus_turn = bonus;
    } else {
        state.status = GameStatus::Moving;
    }
    Ok(outcome)
}
