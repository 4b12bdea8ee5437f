//! Event-driven AI turn coordinator.
//!
//! Every committed store change is a potential trigger. A trigger that passes
//! the cheap filters tries to take the game's processing flag; losing that race
//! is a silent no-op. The winner pauses for the think time, re-reads the game
//! and performs one step (roll, move or pass), clearing the flag in the same
//! write. That write is itself a change, which triggers the next step.
//!
//! A write that only clears the flag (a forfeited bonus roll, a release after a
//! stale or skipped step) is filtered out by every subscriber, so the trigger
//! that made it keeps going while an automated player still has to act.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{Actor, GameFlowService, MoveRequest};
use crate::ai::{create_ai, AdvisedSelector, AiConfig, AiError, AiPlayer, MoveAdvisor};
use crate::domain::game_transition::is_processing_toggle_only;
use crate::domain::{GameId, GameState, GameStatus, Move, Player, PlayerId, PlayerKind};
use crate::error::AppError;
use crate::store::{require_game, GameChange, GameStore};

/// Why a trigger did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoChange,
    /// Only the processing flag moved.
    LockToggle,
    NotActionable,
    HumanTurn,
}

/// What one AI step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiAction {
    Rolled {
        player_id: PlayerId,
        roll: Vec<u8>,
        forfeited: bool,
    },
    Moved {
        player_id: PlayerId,
        mv: Move,
        captured: usize,
        winner: Option<PlayerId>,
    },
    Passed {
        player_id: PlayerId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Skipped(SkipReason),
    /// Another trigger holds the processing flag.
    LockBusy,
    /// The game moved on between the read and the write; nothing was written.
    Stale,
    Acted(AiAction),
}

/// Consecutive stale attempts one trigger makes before giving up.
const MAX_STALE_RETRIES: u32 = 3;

/// Result of one locked step.
struct Step {
    outcome: TriggerOutcome,
    /// The step's final write changed only the processing flag.
    silent: bool,
}

impl Step {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            outcome: TriggerOutcome::Skipped(reason),
            silent: true,
        }
    }

    fn acted(action: AiAction, silent: bool) -> Self {
        Self {
            outcome: TriggerOutcome::Acted(action),
            silent,
        }
    }
}

/// Decision source for one automated seat.
enum Brain {
    Engine(Box<dyn AiPlayer + Send + Sync>),
    Advised(AdvisedSelector),
}

impl Brain {
    async fn choose(
        &self,
        state: &GameState,
        player_id: PlayerId,
    ) -> Result<Option<Move>, AiError> {
        match self {
            Brain::Engine(ai) => ai.choose_move(state, player_id),
            Brain::Advised(selector) => selector.select_move(state, player_id).await,
        }
    }
}

pub struct AiCoordinator<S> {
    flow: GameFlowService<S>,
    advisors: DashMap<String, Arc<dyn MoveAdvisor>>,
    brains: DashMap<(GameId, PlayerId), Arc<Brain>>,
}

impl<S: GameStore> AiCoordinator<S> {
    pub fn new(flow: GameFlowService<S>) -> Self {
        Self {
            flow,
            advisors: DashMap::new(),
            brains: DashMap::new(),
        }
    }

    /// Route seats whose registry name matches `advisor.name()` to `advisor`.
    pub fn with_advisor(self, advisor: Arc<dyn MoveAdvisor>) -> Self {
        self.advisors.insert(advisor.name().to_owned(), advisor);
        self
    }

    pub fn flow(&self) -> &GameFlowService<S> {
        &self.flow
    }

    /// Subscribe now and consume changes on a background task until
    /// `shutdown` fires. Every change committed after this returns is seen.
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let changes = self.flow.store().subscribe();
        tokio::spawn(self.run_loop(changes, shutdown))
    }

    /// Consume store changes until `shutdown` fires, one task per change.
    ///
    /// In-flight triggers are awaited before returning.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        let changes = self.flow.store().subscribe();
        self.run_loop(changes, shutdown).await;
    }

    async fn run_loop(
        self: Arc<Self>,
        mut changes: broadcast::Receiver<GameChange>,
        shutdown: CancellationToken,
    ) {
        let mut tasks = JoinSet::new();
        info!("AI coordinator started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        warn!(error = %e, "AI trigger task failed");
                    }
                }
                received = changes.recv() => match received {
                    Ok(change) => {
                        let this = Arc::clone(&self);
                        tasks.spawn(async move { this.dispatch(change).await });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "AI coordinator lagged behind the change feed");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "AI trigger task failed");
            }
        }
        info!("AI coordinator stopped");
    }

    async fn dispatch(&self, change: GameChange) {
        let game_id = change.game_id;
        match self.handle_change(&change).await {
            Ok(TriggerOutcome::Skipped(reason)) => debug!(game_id, ?reason, "Trigger skipped"),
            Ok(outcome) => debug!(game_id, ?outcome, "Trigger handled"),
            Err(e) => warn!(game_id, code = %e.code(), error = %e, "AI trigger failed"),
        }
    }

    /// Handle one store change.
    pub async fn handle_change(&self, change: &GameChange) -> Result<TriggerOutcome, AppError> {
        let after = &change.after.state;
        if let Some(before) = &change.before {
            if before.state == *after {
                return Ok(TriggerOutcome::Skipped(SkipReason::NoChange));
            }
            if is_processing_toggle_only(&before.state, after) {
                return Ok(TriggerOutcome::Skipped(SkipReason::LockToggle));
            }
        }
        if after.status == GameStatus::Finished {
            self.forget_game(change.game_id);
        }
        if let Some(reason) = skip_reason(after) {
            return Ok(TriggerOutcome::Skipped(reason));
        }
        self.take_turn(change.game_id).await
    }

    /// Trigger a game directly, for example after repairing a stale lock.
    pub async fn resume(&self, game_id: GameId) -> Result<TriggerOutcome, AppError> {
        let doc = require_game(self.flow.store().as_ref(), game_id).await?;
        if doc.state.status == GameStatus::Finished {
            self.forget_game(game_id);
        }
        if let Some(reason) = skip_reason(&doc.state) {
            return Ok(TriggerOutcome::Skipped(reason));
        }
        self.take_turn(game_id).await
    }

    /// Take the flag and step until a write wakes the next trigger.
    ///
    /// Returns the outcome of the last step taken.
    async fn take_turn(&self, game_id: GameId) -> Result<TriggerOutcome, AppError> {
        let mut stale_attempts = 0;
        loop {
            match self.flow.try_acquire_processing(game_id).await {
                Ok(()) => {}
                Err(e) if e.is_lock_contention() => {
                    debug!(game_id, "Processing flag busy, skipping trigger");
                    return Ok(TriggerOutcome::LockBusy);
                }
                Err(e) => return Err(e),
            }

            let step = match self.act_locked(game_id).await {
                // The step's own write already cleared the flag.
                Ok(step @ Step {
                    outcome: TriggerOutcome::Acted(_),
                    ..
                }) => step,
                Ok(step) => {
                    self.release_quietly(game_id).await;
                    step
                }
                Err(e) if e.is_stale() => {
                    info!(game_id, code = %e.code(), "AI step went stale, nothing written");
                    self.release_quietly(game_id).await;
                    Step {
                        outcome: TriggerOutcome::Stale,
                        silent: true,
                    }
                }
                Err(e) => {
                    self.release_quietly(game_id).await;
                    return Err(e);
                }
            };

            if step.outcome == TriggerOutcome::Stale {
                stale_attempts += 1;
                if stale_attempts > MAX_STALE_RETRIES {
                    warn!(game_id, stale_attempts, "AI step keeps going stale, giving up");
                    return Ok(step.outcome);
                }
            } else {
                stale_attempts = 0;
            }

            if !step.silent || !self.automation_pending(game_id).await? {
                return Ok(step.outcome);
            }
            debug!(game_id, outcome = ?step.outcome, "Silent write, continuing in this trigger");
            tokio::task::yield_now().await;
        }
    }

    /// An automated player must act and nobody holds the flag.
    async fn automation_pending(&self, game_id: GameId) -> Result<bool, AppError> {
        let doc = require_game(self.flow.store().as_ref(), game_id).await?;
        Ok(!doc.state.processing && skip_reason(&doc.state).is_none())
    }

    async fn release_quietly(&self, game_id: GameId) {
        if let Err(e) = self.flow.release_processing(game_id).await {
            warn!(game_id, error = %e, "Failed to release processing flag");
        }
    }

    /// One step while holding the flag.
    async fn act_locked(&self, game_id: GameId) -> Result<Step, AppError> {
        let think_time = self.flow.config().think_time;
        if !think_time.is_zero() {
            tokio::time::sleep(think_time).await;
        }

        let doc = require_game(self.flow.store().as_ref(), game_id).await?;
        if let Some(reason) = skip_reason(&doc.state) {
            return Ok(Step::skipped(reason));
        }
        let Some(player) = doc.state.acting_player().cloned() else {
            return Ok(Step::skipped(SkipReason::NotActionable));
        };
        let actor = Actor::Automation(player.id);

        match doc.state.status {
            GameStatus::Rolling => {
                let result = self.flow.roll_internal(game_id, actor, true).await?;
                Ok(Step::acted(
                    AiAction::Rolled {
                        player_id: player.id,
                        roll: result.outcome.roll,
                        forfeited: result.outcome.forfeited,
                    },
                    result.flag_only,
                ))
            }
            GameStatus::Moving => {
                let brain = self.brain_for(game_id, &player)?;
                match brain.choose(&doc.state, player.id).await? {
                    Some(mv) => {
                        let result = self
                            .flow
                            .move_internal(
                                game_id,
                                actor,
                                MoveRequest::from(mv),
                                Some(doc.version),
                                true,
                            )
                            .await?;
                        let winner = result.outcome.winner;
                        if winner.is_some() {
                            self.forget_game(game_id);
                        }
                        Ok(Step::acted(
                            AiAction::Moved {
                                player_id: player.id,
                                mv,
                                captured: result.outcome.captured.len(),
                                winner,
                            },
                            result.flag_only,
                        ))
                    }
                    None => {
                        let result = self.flow.pass_internal(game_id, actor, true).await?;
                        Ok(Step::acted(
                            AiAction::Passed {
                                player_id: player.id,
                            },
                            result.flag_only,
                        ))
                    }
                }
            }
            GameStatus::Waiting | GameStatus::Finished => {
                Ok(Step::skipped(SkipReason::NotActionable))
            }
        }
    }

    fn brain_for(&self, game_id: GameId, player: &Player) -> Result<Arc<Brain>, AppError> {
        if let Some(brain) = self.brains.get(&(game_id, player.id)) {
            return Ok(Arc::clone(brain.value()));
        }

        let PlayerKind::Ai {
            registry_name,
            difficulty,
            config,
        } = &player.kind
        else {
            return Err(AppError::internal(format!(
                "player {} is not automated",
                player.id
            )));
        };

        let brain = match self.advisors.get(registry_name) {
            Some(advisor) => {
                let seed = AiConfig::from_json(config.as_ref()).seed();
                Brain::Advised(AdvisedSelector::new(
                    Arc::clone(advisor.value()),
                    self.flow.config().advisor_timeout,
                    *difficulty,
                    seed,
                ))
            }
            None => Brain::Engine(
                create_ai(registry_name, *difficulty, config.as_ref()).ok_or_else(|| {
                    AppError::internal(format!("AI type '{registry_name}' is not registered"))
                })?,
            ),
        };
        debug!(
            game_id,
            player_id = player.id,
            registry_name = registry_name.as_str(),
            "AI instance created"
        );

        let brain = Arc::new(brain);
        self.brains.insert((game_id, player.id), Arc::clone(&brain));
        Ok(brain)
    }

    fn forget_game(&self, game_id: GameId) {
        self.brains.retain(|(game, _), _| *game != game_id);
    }
}

fn skip_reason(state: &GameState) -> Option<SkipReason> {
    if !state.status.is_actionable() {
        return Some(SkipReason::NotActionable);
    }
    match state.acting_player() {
        None => Some(SkipReason::NotActionable),
        Some(player) if !player.is_automated() => Some(SkipReason::HumanTurn),
        Some(_) => None,
    }
}
