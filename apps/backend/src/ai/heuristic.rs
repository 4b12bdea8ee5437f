//! Heuristic: difficulty-tuned scoring over every legal (die, token) pair.
//!
//! Each candidate gets a scalar score built from fixed weights; the highest
//! score wins and ties are broken at random. `easy` adds a large random jitter
//! so it plays erratically, `hard` adds none.

use parking_lot::Mutex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::ai::{AiError, AiPlayer};
use crate::domain::board::{distance_to_home, squares_behind, DIE_FACES};
use crate::domain::{
    legal_moves, project_position, Difficulty, GameState, Move, Player, PlayerId, Token, RING_SIZE,
};

/// Fixed weight vector for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub capture: i32,
    pub finish: i32,
    pub activate: i32,
    /// Scaled by the fraction of the path already covered.
    pub advance: i32,
    /// Per threatening token; negative.
    pub risk: i32,
    pub safe_zone: i32,
    /// Upper bound of the uniform jitter added to every score.
    pub jitter: u32,
}

impl Weights {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                capture: 30,
                finish: 40,
                activate: 20,
                advance: 10,
                risk: -5,
                safe_zone: 10,
                jitter: 40,
            },
            Difficulty::Medium => Self {
                capture: 60,
                finish: 70,
                activate: 35,
                advance: 20,
                risk: -15,
                safe_zone: 20,
                jitter: 10,
            },
            Difficulty::Hard => Self {
                capture: 100,
                finish: 90,
                activate: 50,
                advance: 30,
                risk: -30,
                safe_zone: 35,
                jitter: 0,
            },
        }
    }
}

pub struct Heuristic {
    difficulty: Difficulty,
    weights: Weights,
    rng: Mutex<ChaCha8Rng>,
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>, difficulty: Difficulty) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            difficulty,
            weights: Weights::for_difficulty(difficulty),
            rng: Mutex::new(rng),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

impl AiPlayer for Heuristic {
    fn choose_move(
        &self,
        state: &GameState,
        player_id: PlayerId,
    ) -> Result<Option<Move>, AiError> {
        let player = state
            .player(player_id)
            .ok_or_else(|| AiError::Internal(format!("player {player_id} is not seated")))?;

        let candidates = legal_moves(state, player);
        if candidates.is_empty() {
            return Ok(None);
        }

        let mut rng = self.rng.lock();
        let mut best: Vec<Move> = Vec::new();
        let mut best_score = f64::NEG_INFINITY;
        for mv in candidates {
            let Some(base) = score_move(&self.weights, state, player, &mv) else {
                continue;
            };
            let score = base + jitter(&self.weights, &mut *rng);
            trace!(?mv, score, "Scored candidate");
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(mv);
            } else if score == best_score {
                best.push(mv);
            }
        }

        Ok(best.choose(&mut *rng).copied())
    }
}

fn jitter(weights: &Weights, rng: &mut impl Rng) -> f64 {
    if weights.jitter == 0 {
        0.0
    } else {
        rng.random_range(0.0..=f64::from(weights.jitter))
    }
}

/// Deterministic part of a candidate's score. `None` if the token is missing.
pub fn score_move(
    weights: &Weights,
    state: &GameState,
    player: &Player,
    mv: &Move,
) -> Option<f64> {
    let token = state.tokens.find(mv.color, mv.token_serial)?;

    if !token.active {
        let mut score = f64::from(weights.activate);
        if !state.opponents_at(player, mv.color.start_square()).is_empty() {
            score += f64::from(weights.capture);
        }
        return Some(score);
    }

    let projection = project_position(token, mv.die);
    let home = mv.color.home_position();
    let lands_home = projection.will_be_safe && projection.position == home;
    let mut score = 0.0;

    if lands_home {
        score += f64::from(weights.finish);
    }
    if !projection.will_be_safe && !state.opponents_at(player, projection.position).is_empty() {
        score += f64::from(weights.capture);
    }

    let after = Token {
        position: projection.position,
        is_safe_path: projection.will_be_safe,
        is_finished: lands_home,
        ..*token
    };
    let covered = i32::from(RING_SIZE) - i32::from(distance_to_home(&after));
    score += (f64::from(weights.advance) / f64::from(RING_SIZE) * f64::from(covered)).round();

    if projection.will_be_safe {
        let bonus = f64::from(weights.safe_zone);
        score += if token.is_safe_path { bonus / 2.0 } else { bonus };
    } else {
        let threats = threats_behind(state, player, projection.position);
        score += f64::from(threats) * f64::from(weights.risk);
    }

    Some(score)
}

/// Opposing ring tokens one to six squares behind `position`.
fn threats_behind(state: &GameState, player: &Player, position: u8) -> u32 {
    squares_behind(position, DIE_FACES)
        .map(|square| state.opponents_at(player, square).len() as u32)
        .sum()
}
