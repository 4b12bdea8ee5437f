use std::time::Duration;

use ludo_backend::domain::GameId;
use ludo_backend::store::{require_game, GameDocument};
use ludo_backend::{GameStore, InMemoryStore};
use tokio::sync::broadcast::error::RecvError;

/// Wait until the game's document satisfies `done`, or panic after `limit`.
pub async fn wait_for(
    store: &InMemoryStore,
    game_id: GameId,
    limit: Duration,
    done: impl Fn(&GameDocument) -> bool,
) -> GameDocument {
    let mut changes = store.subscribe();
    let current = require_game(store, game_id).await.expect("game exists");
    if done(&current) {
        return current;
    }

    let waited = tokio::time::timeout(limit, async {
        loop {
            match changes.recv().await {
                Ok(change) if change.game_id == game_id && done(&change.after) => {
                    return change.after;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => {
                    let doc = require_game(store, game_id).await.expect("game exists");
                    if done(&doc) {
                        return doc;
                    }
                }
                Err(RecvError::Closed) => panic!("change feed closed"),
            }
        }
    })
    .await;

    match waited {
        Ok(doc) => doc,
        Err(_) => {
            let doc = require_game(store, game_id).await.expect("game exists");
            panic!("condition not reached within {limit:?}; last document: {doc:?}")
        }
    }
}
