//! Game document storage contract.
//!
//! A store holds one versioned [`GameDocument`] per game and offers a single
//! mutation primitive: a read-then-conditional-write transaction. Every
//! committed write is published to subscribers as a [`GameChange`].

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::broadcast;

pub use memory::InMemoryStore;

use crate::domain::{GameId, GameState};
use crate::error::AppError;

/// Persisted game entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub id: GameId,
    /// Bumped by the store on every committed change.
    pub version: u64,
    pub state: GameState,
    /// When the processing flag was last acquired.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub processing_since: Option<OffsetDateTime>,
}

/// Before/after pair published for every committed write.
#[derive(Debug, Clone)]
pub struct GameChange {
    pub game_id: GameId,
    /// `None` for a freshly inserted document.
    pub before: Option<GameDocument>,
    pub after: GameDocument,
}

#[async_trait]
pub trait GameStore: Send + Sync + 'static {
    /// Persist a new game and return its document.
    async fn insert(&self, state: GameState) -> Result<GameDocument, AppError>;

    async fn get(&self, game_id: GameId) -> Result<Option<GameDocument>, AppError>;

    /// Run `f` against the current document, serialized with every other
    /// transaction on the same game.
    ///
    /// If `f` returns `Err` nothing is written. If it returns `Ok` and the
    /// document changed, the change is committed with a bumped version.
    /// `f` cannot change the document's id or version.
    async fn run_transaction<R, F>(&self, game_id: GameId, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut GameDocument) -> Result<R, AppError> + Send,
        R: Send;

    fn subscribe(&self) -> broadcast::Receiver<GameChange>;
}

/// Fetch a game or fail with `GAME_NOT_FOUND`.
pub async fn require_game<S: GameStore>(
    store: &S,
    game_id: GameId,
) -> Result<GameDocument, AppError> {
    store
        .get(game_id)
        .await?
        .ok_or_else(|| AppError::game_not_found(game_id))
}
