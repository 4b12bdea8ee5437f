use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::{GameChange, GameDocument, GameStore};
use crate::domain::{GameId, GameState};
use crate::error::AppError;

const CHANGE_CAPACITY: usize = 4096;

/// Process-local store backed by a concurrent map.
///
/// Transactions on one game hold that game's map entry for the duration of the
/// closure, so they are serialized; different games proceed in parallel.
pub struct InMemoryStore {
    games: DashMap<GameId, GameDocument>,
    next_id: AtomicI64,
    changes: broadcast::Sender<GameChange>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(CHANGE_CAPACITY)
    }

    /// Store whose change channel buffers `capacity` notifications.
    pub fn with_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity);
        Self {
            games: DashMap::new(),
            next_id: AtomicI64::new(1),
            changes,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn publish(&self, change: GameChange) {
        // No subscribers is fine.
        if self.changes.send(change).is_err() {
            trace!("Change dropped; no subscribers");
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn insert(&self, state: GameState) -> Result<GameDocument, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let doc = GameDocument {
            id,
            version: 1,
            state,
            processing_since: None,
        };
        self.games.insert(id, doc.clone());
        debug!(game_id = id, "Game inserted");
        self.publish(GameChange {
            game_id: id,
            before: None,
            after: doc.clone(),
        });
        Ok(doc)
    }

    async fn get(&self, game_id: GameId) -> Result<Option<GameDocument>, AppError> {
        Ok(self.games.get(&game_id).map(|doc| doc.clone()))
    }

    async fn run_transaction<R, F>(&self, game_id: GameId, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut GameDocument) -> Result<R, AppError> + Send,
        R: Send,
    {
        let mut entry = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| AppError::game_not_found(game_id))?;

        let mut draft = entry.clone();
        let out = f(&mut draft)?;

        draft.id = entry.id;
        draft.version = entry.version;
        if draft != *entry {
            draft.version += 1;
            let before = std::mem::replace(&mut *entry, draft);
            let after = entry.clone();
            trace!(game_id, version = after.version, "Transaction committed");
            // Published under the entry lock so subscribers see versions in order.
            self.publish(GameChange {
                game_id,
                before: Some(before),
                after,
            });
        }
        Ok(out)
    }

    fn subscribe(&self) -> broadcast::Receiver<GameChange> {
        self.changes.subscribe()
    }
}
