use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::lock::clear_processing;
use super::{Actor, GameFlowMutationResult, GameFlowService};
use crate::domain::legality::command_for;
use crate::domain::state::{is_double_six, is_sub_multiset};
use crate::domain::{
    apply_move, begin_turn, legal_moves, lobby, roll_dice, Color, GameId, GameState, GameStatus,
    Move, Player, PlayerId, PlayerKind, Resolution, RollOutcome,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::store::{GameDocument, GameStore};

/// A token move as submitted by a player.
///
/// `dice` lists the values to spend, in order. When omitted the dice pinned
/// with [`GameFlowService::select_dice`] are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub color: Color,
    pub token_serial: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<Vec<u8>>,
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        Self {
            color: mv.color,
            token_serial: mv.token_serial,
            dice: Some(vec![mv.die]),
        }
    }
}

impl<S: GameStore> GameFlowService<S> {
    /// Create an empty game waiting for players.
    pub async fn create_game(&self) -> Result<GameDocument, AppError> {
        let doc = self.store.insert(GameState::new()).await?;
        info!(game_id = doc.id, "Game created");
        Ok(doc)
    }

    /// Seat a player; the second seat starts the game.
    pub async fn join_game(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        name: impl Into<String>,
        kind: PlayerKind,
    ) -> Result<GameFlowMutationResult<Player>, AppError> {
        let name = name.into();
        let result = self
            .run_mutation(game_id, None, move |doc| {
                let player = lobby::join_game(&mut doc.state, player_id, name, kind)?;
                Ok(player.clone())
            })
            .await?;
        info!(
            game_id,
            player_id,
            colors = ?result.outcome.colors,
            automated = result.outcome.is_automated(),
            "Player joined"
        );
        Ok(result)
    }

    /// Roll for `actor`.
    pub async fn roll_for(
        &self,
        game_id: GameId,
        actor: Actor,
    ) -> Result<GameFlowMutationResult<RollOutcome>, AppError> {
        self.roll_internal(game_id, actor, false).await
    }

    /// Roll inside one transaction, optionally clearing the processing flag in
    /// the same write.
    pub(super) async fn roll_internal(
        &self,
        game_id: GameId,
        actor: Actor,
        release_lock: bool,
    ) -> Result<GameFlowMutationResult<RollOutcome>, AppError> {
        let dice = &*self.dice;
        let count = self.config.dice_per_roll;

        let result = self
            .run_mutation(game_id, None, move |doc| {
                actor.authorize(&doc.state, GameStatus::Rolling)?;
                let roll = roll_dice(dice, count);
                let outcome = begin_turn(&mut doc.state, roll)?;
                if release_lock {
                    clear_processing(doc);
                }
                Ok(outcome)
            })
            .await?;

        let outcome = &result.outcome;
        info!(
            game_id,
            player_id = actor.player_id(),
            roll = ?outcome.roll,
            forfeited = outcome.forfeited,
            bonus_turn = outcome.bonus_turn,
            "Dice rolled"
        );
        Ok(result)
    }

    /// Pin the dice the acting player intends to spend on their next move.
    pub async fn select_dice(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        dice: Vec<u8>,
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(game_id, player_id, ?dice, "Selecting dice");
        self.run_mutation(game_id, None, move |doc| {
            Actor::Human(player_id).authorize(&doc.state, GameStatus::Moving)?;
            if dice.is_empty() {
                return Err(DomainError::illegal("no dice selected").into());
            }
            if !is_sub_multiset(&dice, &doc.state.remaining_dice()) {
                return Err(DomainError::illegal(format!(
                    "dice {dice:?} are not among the remaining {:?}",
                    doc.state.remaining_dice()
                ))
                .into());
            }
            doc.state.active_dice_config = Some(dice);
            Ok(())
        })
        .await
    }

    /// Move a token for `actor`.
    ///
    /// With `expected_version` set the move is rejected as `STALE_STATE` unless
    /// it is applied to exactly that document version.
    pub async fn submit_move(
        &self,
        game_id: GameId,
        actor: Actor,
        request: MoveRequest,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<Resolution>, AppError> {
        self.move_internal(game_id, actor, request, expected_version, false)
            .await
    }

    pub(super) async fn move_internal(
        &self,
        game_id: GameId,
        actor: Actor,
        request: MoveRequest,
        expected_version: Option<u64>,
        release_lock: bool,
    ) -> Result<GameFlowMutationResult<Resolution>, AppError> {
        let result = self
            .run_mutation(game_id, expected_version, move |doc| {
                let resolution = resolve_request(&doc.state, actor, &request)?;
                doc.state = resolution.state.clone();
                if release_lock {
                    clear_processing(doc);
                }
                Ok(resolution)
            })
            .await?;

        let res = &result.outcome;
        info!(
            game_id,
            player_id = actor.player_id(),
            captured = res.captured.len(),
            finished = res.token_finished,
            turn_over = res.turn_over,
            bonus_turn = res.bonus_turn,
            "Move applied"
        );
        if let Some(winner) = res.winner {
            info!(game_id, winner, "Game finished");
        }
        Ok(result)
    }

    /// Give up the remaining dice when no token can use any of them.
    pub async fn pass_turn(
        &self,
        game_id: GameId,
        actor: Actor,
    ) -> Result<GameFlowMutationResult, AppError> {
        self.pass_internal(game_id, actor, false).await
    }

    pub(super) async fn pass_internal(
        &self,
        game_id: GameId,
        actor: Actor,
        release_lock: bool,
    ) -> Result<GameFlowMutationResult, AppError> {
        let result = self
            .run_mutation(game_id, None, move |doc| {
                let player = actor.authorize(&doc.state, GameStatus::Moving)?;
                if !legal_moves(&doc.state, player).is_empty() {
                    return Err(DomainError::illegal("a legal move is still available").into());
                }
                let bonus = is_double_six(&doc.state.dice_roll);
                doc.state.end_turn(bonus);
                if release_lock {
                    clear_processing(doc);
                }
                Ok(())
            })
            .await?;
        info!(game_id, player_id = actor.player_id(), "Turn passed");
        Ok(result)
    }
}

/// Validate `request` against `state` and resolve it.
fn resolve_request(
    state: &GameState,
    actor: Actor,
    request: &MoveRequest,
) -> Result<Resolution, AppError> {
    let player = actor.authorize(state, GameStatus::Moving)?;
    if !player.controls(request.color) {
        return Err(DomainError::illegal(format!(
            "player {} does not control {}",
            player.id, request.color
        ))
        .into());
    }

    let dice = request
        .dice
        .clone()
        .or_else(|| state.active_dice_config.clone())
        .ok_or_else(|| DomainError::illegal("no dice selected"))?;
    let remaining = state.remaining_dice();
    if !is_sub_multiset(&dice, &remaining) {
        return Err(DomainError::illegal(format!(
            "dice {dice:?} are not among the remaining {remaining:?}"
        ))
        .into());
    }

    let token = state
        .tokens
        .find(request.color, request.token_serial)
        .ok_or(DomainError::TokenNotFound {
            color: request.color,
            serial: request.token_serial,
        })?;
    let command = command_for(state, token, &dice)?;
    Ok(apply_move(state, &command)?)
}
