//! Error codes for the Ludo backend.
//!
//! This module defines all error codes used throughout the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! the web layer forwards to clients.

use core::fmt;

/// Centralized error codes for the Ludo backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move validation
    /// Referenced token does not exist in its color
    TokenNotFound,
    /// Die/token combination rejected by the legality filter
    IllegalMove,
    /// Acting player is not the player whose turn it is
    NotYourTurn,
    /// Action is not valid in the current game status
    PhaseMismatch,
    /// Game already has two players
    GameFull,
    /// Player has already joined this game
    AlreadyJoined,

    // Orchestration
    /// Turn owner changed after the processing lock was taken
    StaleTurn,
    /// Status changed after the processing lock was taken
    StaleStatus,
    /// Document moved on since the decision was made
    StaleState,
    /// Processing lock is held by another trigger
    LockNotAcquired,
    /// External move advisor failed
    AdvisorFailure,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,

    // System Errors
    /// Internal error (explicit problem code)
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::GameFull => "GAME_FULL",
            Self::AlreadyJoined => "ALREADY_JOINED",

            Self::StaleTurn => "STALE_TURN",
            Self::StaleStatus => "STALE_STATUS",
            Self::StaleState => "STALE_STATE",
            Self::LockNotAcquired => "LOCK_NOT_ACQUIRED",
            Self::AdvisorFailure => "ADVISOR_FAILURE",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Stale-read conflicts detected inside an orchestrator transaction.
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleTurn | Self::StaleStatus | Self::StaleState)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
