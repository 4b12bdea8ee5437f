//! Domain-level error type used by the pure game logic.
//!
//! This error type is store- and transport-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::{Color, GameStatus, PlayerId};
use crate::errors::ErrorCode;

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resolver precondition: the token must exist in its color.
    TokenNotFound { color: Color, serial: u8 },
    /// The die/token combination would be rejected by the legality filter.
    IllegalMove(String),
    /// A human tried to act outside their turn.
    NotYourTurn { player_id: PlayerId },
    /// A human action arrived in the wrong status.
    PhaseMismatch {
        expected: GameStatus,
        actual: GameStatus,
    },
    /// Turn owner changed underneath an automated step.
    StaleTurn {
        expected: PlayerId,
        actual: Option<PlayerId>,
    },
    /// Status changed underneath an automated step.
    StaleStatus {
        expected: GameStatus,
        actual: GameStatus,
    },
    /// Document version moved on since the decision was made.
    StaleState { expected: u64, actual: u64 },
    GameFull,
    AlreadyJoined { player_id: PlayerId },
    UnknownPlayer { player_id: PlayerId },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::TokenNotFound { color, serial } => {
                write!(f, "token {serial} not found for {color}")
            }
            DomainError::IllegalMove(d) => write!(f, "illegal move: {d}"),
            DomainError::NotYourTurn { player_id } => {
                write!(f, "player {player_id} acted out of turn")
            }
            DomainError::PhaseMismatch { expected, actual } => {
                write!(f, "phase mismatch: expected {expected}, game is {actual}")
            }
            DomainError::StaleTurn { expected, actual } => {
                write!(f, "stale turn: expected {expected}, now {actual:?}")
            }
            DomainError::StaleStatus { expected, actual } => {
                write!(f, "stale status: expected {expected}, now {actual}")
            }
            DomainError::StaleState { expected, actual } => {
                write!(f, "stale state: decided on version {expected}, now {actual}")
            }
            DomainError::GameFull => write!(f, "game already has two players"),
            DomainError::AlreadyJoined { player_id } => {
                write!(f, "player {player_id} already joined")
            }
            DomainError::UnknownPlayer { player_id } => {
                write!(f, "player {player_id} is not in this game")
            }
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn illegal(detail: impl Into<String>) -> Self {
        Self::IllegalMove(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::TokenNotFound { .. } => ErrorCode::TokenNotFound,
            DomainError::IllegalMove(_) => ErrorCode::IllegalMove,
            DomainError::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            DomainError::PhaseMismatch { .. } => ErrorCode::PhaseMismatch,
            DomainError::StaleTurn { .. } => ErrorCode::StaleTurn,
            DomainError::StaleStatus { .. } => ErrorCode::StaleStatus,
            DomainError::StaleState { .. } => ErrorCode::StaleState,
            DomainError::GameFull => ErrorCode::GameFull,
            DomainError::AlreadyJoined { .. } => ErrorCode::AlreadyJoined,
            DomainError::UnknownPlayer { .. } => ErrorCode::PlayerNotFound,
        }
    }
}
