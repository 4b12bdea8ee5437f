use thiserror::Error;

use crate::domain::GameId;
use crate::errors::{DomainError, ErrorCode};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Processing lock held for game {game_id}")]
    LockNotAcquired { game_id: GameId },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(err) => err.code(),
            AppError::NotFound { code, .. } => *code,
            AppError::LockNotAcquired { .. } => ErrorCode::LockNotAcquired,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn game_not_found(game_id: GameId) -> Self {
        Self::NotFound {
            code: ErrorCode::GameNotFound,
            detail: format!("game {game_id} does not exist"),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn lock_not_acquired(game_id: GameId) -> Self {
        Self::LockNotAcquired { game_id }
    }

    /// Expected contention outcome, not a failure.
    pub fn is_lock_contention(&self) -> bool {
        matches!(self, AppError::LockNotAcquired { .. })
    }

    /// Stale-read conflict detected while re-validating inside a transaction.
    pub fn is_stale(&self) -> bool {
        self.code().is_stale()
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
