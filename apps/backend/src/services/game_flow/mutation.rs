use tracing::debug;

use crate::domain::game_transition::{
    derive_game_transitions, is_processing_toggle_only, GameTransition,
};
use crate::domain::GameId;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::game_flow::GameFlowService;
use crate::store::{GameDocument, GameStore};

#[derive(Debug)]
pub struct GameFlowMutationResult<T = ()> {
    pub final_game: GameDocument,
    pub old_version: u64,
    pub transitions: Vec<GameTransition>,
    /// The write changed nothing but the processing flag. Change subscribers
    /// treat such writes as lock traffic and ignore them.
    pub flag_only: bool,
    /// Whatever the mutation chose to report.
    pub outcome: T,
}

impl<T> GameFlowMutationResult<T> {
    pub fn final_version(&self) -> u64 {
        self.final_game.version
    }

    pub fn changed(&self) -> bool {
        self.final_game.version != self.old_version
    }
}

impl<S: GameStore> GameFlowService<S> {
    /// Run `mutation` inside one store transaction.
    ///
    /// With `expected_version` set, the transaction aborts with `STALE_STATE`
    /// unless the document still has that version. Transitions are derived
    /// from the transaction's own before/after read.
    pub(super) async fn run_mutation<T, F>(
        &self,
        game_id: GameId,
        expected_version: Option<u64>,
        mutation: F,
    ) -> Result<GameFlowMutationResult<T>, AppError>
    where
        F: FnOnce(&mut GameDocument) -> Result<T, AppError> + Send,
        T: Send,
    {
        self.store
            .run_transaction(game_id, move |doc| {
                if let Some(expected) = expected_version {
                    if doc.version != expected {
                        return Err(DomainError::StaleState {
                            expected,
                            actual: doc.version,
                        }
                        .into());
                    }
                }

                let before = doc.clone();
                let outcome = mutation(doc)?;

                let transitions = derive_game_transitions(&before.state, &doc.state);
                let flag_only = is_processing_toggle_only(&before.state, &doc.state);
                let mut final_game = doc.clone();
                final_game.id = before.id;
                final_game.version = before.version;
                if final_game != before {
                    final_game.version += 1;
                }
                debug!(
                    game_id,
                    old_version = before.version,
                    new_version = final_game.version,
                    transitions = transitions.len(),
                    "Mutation applied"
                );

                Ok(GameFlowMutationResult {
                    final_game,
                    old_version: before.version,
                    transitions,
                    flag_only,
                    outcome,
                })
            })
            .await
    }
}
