//! Random AI player - picks uniformly among legal moves.

use parking_lot::Mutex;
use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{legal_moves, GameState, Move, PlayerId};

/// Baseline AI used for smoke tests and as a sparring partner.
///
/// Deterministic when seeded.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

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

impl AiPlayer for RandomPlayer {
    fn choose_move(
        &self,
        state: &GameState,
        player_id: PlayerId,
    ) -> Result<Option<Move>, AiError> {
        let player = state
            .player(player_id)
            .ok_or_else(|| AiError::Internal(format!("player {player_id} is not seated")))?;

        let moves = legal_moves(state, player);
        let mut rng = self.rng.lock();
        Ok(moves.choose(&mut *rng).copied())
    }
}
