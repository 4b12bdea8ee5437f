//! Externally-advised move selection with heuristic fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ai::{AiError, AiPlayer, Heuristic, MoveAdvisor};
use crate::domain::{legal_moves, Difficulty, GameState, Move, PlayerId};

/// Wraps an untrusted [`MoveAdvisor`] so callers always get a legal move.
///
/// The advisor's answer is used only when it arrives within `timeout` and is
/// one of the acting player's legal moves. Anything else is logged and the
/// heuristic engine decides instead.
pub struct AdvisedSelector {
    advisor: Arc<dyn MoveAdvisor>,
    fallback: Heuristic,
    timeout: Duration,
}

impl AdvisedSelector {
    pub fn new(
        advisor: Arc<dyn MoveAdvisor>,
        timeout: Duration,
        difficulty: Difficulty,
        seed: Option<u64>,
    ) -> Self {
        Self {
            advisor,
            fallback: Heuristic::new(seed, difficulty),
            timeout,
        }
    }

    pub fn advisor_name(&self) -> &str {
        self.advisor.name()
    }

    pub async fn select_move(
        &self,
        state: &GameState,
        player_id: PlayerId,
    ) -> Result<Option<Move>, AiError> {
        let player = state
            .player(player_id)
            .ok_or_else(|| AiError::Internal(format!("player {player_id} is not seated")))?;
        let legal = legal_moves(state, player);
        if legal.is_empty() {
            return Ok(None);
        }

        let advisor = self.advisor.name();
        let failure = match tokio::time::timeout(
            self.timeout,
            self.advisor.select_move(state, player_id),
        )
        .await
        {
            Ok(Ok(Some(mv))) if legal.contains(&mv) => {
                debug!(advisor, player_id, ?mv, "Advisor move accepted");
                return Ok(Some(mv));
            }
            Ok(Ok(Some(mv))) => AiError::InvalidMove(format!("{mv:?} is not legal")),
            Ok(Ok(None)) => AiError::InvalidMove("declined while legal moves exist".into()),
            Ok(Err(e)) => e,
            Err(_) => AiError::Timeout,
        };

        warn!(
            advisor,
            player_id,
            error = %failure,
            "Advisor failed; falling back to heuristic"
        );
        self.fallback.choose_move(state, player_id)
    }
}
