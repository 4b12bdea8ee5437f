//! Processing flag: the compare-and-set lock that keeps concurrent AI triggers
//! from acting on the same game twice.

use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::GameId;
use crate::error::AppError;
use crate::services::game_flow::GameFlowService;
use crate::store::{GameDocument, GameStore};

pub(super) fn clear_processing(doc: &mut GameDocument) {
    doc.state.processing = false;
    doc.processing_since = None;
}

impl<S: GameStore> GameFlowService<S> {
    /// Set the processing flag if it is clear.
    ///
    /// Fails with `LOCK_NOT_ACQUIRED` (and writes nothing) when another trigger
    /// holds it.
    pub async fn try_acquire_processing(&self, game_id: GameId) -> Result<(), AppError> {
        self.store
            .run_transaction(game_id, |doc| {
                if doc.state.processing {
                    return Err(AppError::lock_not_acquired(game_id));
                }
                doc.state.processing = true;
                doc.processing_since = Some(OffsetDateTime::now_utc());
                Ok(())
            })
            .await?;
        debug!(game_id, "Processing flag acquired");
        Ok(())
    }

    /// Clear the processing flag. Returns whether it was set.
    pub async fn release_processing(&self, game_id: GameId) -> Result<bool, AppError> {
        let was_set = self
            .store
            .run_transaction(game_id, |doc| {
                let was_set = doc.state.processing;
                clear_processing(doc);
                Ok(was_set)
            })
            .await?;
        if was_set {
            debug!(game_id, "Processing flag released");
        }
        Ok(was_set)
    }

    /// Clear a processing flag held for longer than `max_age`
    /// (the configured stale-lock age when `None`).
    ///
    /// A flag with no acquisition timestamp counts as stale. Returns whether
    /// the flag was cleared.
    pub async fn repair_stale_lock(
        &self,
        game_id: GameId,
        max_age: Option<Duration>,
    ) -> Result<bool, AppError> {
        let max_age = max_age.unwrap_or(self.config.stale_lock_after);
        let now = OffsetDateTime::now_utc();

        let repaired = self
            .store
            .run_transaction(game_id, |doc| {
                if !doc.state.processing {
                    return Ok(None);
                }
                let held_for = doc.processing_since.map(|since| now - since);
                let stale = match held_for {
                    Some(age) => age >= max_age,
                    None => true,
                };
                if !stale {
                    return Ok(None);
                }
                clear_processing(doc);
                Ok(Some(held_for))
            })
            .await?;

        match repaired {
            Some(held_for) => {
                warn!(
                    game_id,
                    held_for = ?held_for,
                    "Cleared stale processing flag"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
