//! Game flow service - bridges pure domain logic with the document store.
//!
//! Every state change runs inside one store transaction that re-validates the
//! acting player and phase against the transaction's own read. Humans and the
//! AI coordinator share the same entry points; the [`Actor`] passed in decides
//! how a mismatch is reported.

mod actor;
mod ai_coordinator;
mod lock;
mod mutation;
mod player_actions;

use std::sync::Arc;

pub use actor::Actor;
pub use ai_coordinator::{AiAction, AiCoordinator, SkipReason, TriggerOutcome};
pub use mutation::GameFlowMutationResult;
pub use player_actions::MoveRequest;

use crate::config::EngineConfig;
use crate::domain::DiceSource;
use crate::store::GameStore;

/// Game flow service, generic over the backing store.
pub struct GameFlowService<S> {
    store: Arc<S>,
    dice: Arc<dyn DiceSource>,
    config: EngineConfig,
}

impl<S: GameStore> GameFlowService<S> {
    pub fn new(store: Arc<S>, dice: Arc<dyn DiceSource>, config: EngineConfig) -> Self {
        Self {
            store,
            dice,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<S> Clone for GameFlowService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            dice: Arc::clone(&self.dice),
            config: self.config.clone(),
        }
    }
}
