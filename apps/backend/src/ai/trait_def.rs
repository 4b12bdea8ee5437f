//! AI player and move-advisor contracts.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{GameState, Move, PlayerId};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Errors that can occur during AI decision-making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// AI failed to make a decision within timeout
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::Internal {
            code: ErrorCode::AdvisorFailure,
            detail: err.to_string(),
        }
    }
}

/// Synchronous move engine.
///
/// Implementations see the full game state and pick one of the acting
/// player's legal single-die moves, or `None` when nothing can move.
pub trait AiPlayer: Send + Sync {
    fn choose_move(&self, state: &GameState, player_id: PlayerId)
        -> Result<Option<Move>, AiError>;
}

/// External move source (for example a language-model service).
///
/// Advisors are untrusted: whatever they return is checked against the legal
/// move list by [`AdvisedSelector`](super::AdvisedSelector).
#[async_trait]
pub trait MoveAdvisor: Send + Sync {
    /// Registry name matched against `PlayerKind::Ai::registry_name`.
    fn name(&self) -> &str;

    async fn select_move(
        &self,
        state: &GameState,
        player_id: PlayerId,
    ) -> Result<Option<Move>, AiError>;
}
