//! Game setup helpers for integration tests

use std::sync::Arc;

use backend_test_support::seeds::test_seed;
use ludo_backend::ai::Heuristic;
use ludo_backend::domain::{
    Difficulty, DiceSource, GameId, PlayerId, PlayerKind, RngDice, ScriptedDice,
};
use ludo_backend::{AppError, EngineConfig, GameFlowService, InMemoryStore};
use serde_json::json;

pub const FIRST: PlayerId = 1;
pub const SECOND: PlayerId = 2;

fn flow_with(dice: Arc<dyn DiceSource>) -> GameFlowService<InMemoryStore> {
    GameFlowService::new(
        Arc::new(InMemoryStore::new()),
        dice,
        EngineConfig::instant(),
    )
}

/// Flow whose dice replay `script` forever.
pub fn scripted_flow(script: &[u8]) -> GameFlowService<InMemoryStore> {
    flow_with(Arc::new(
        ScriptedDice::new(script.to_vec()).expect("valid dice script"),
    ))
}

/// Flow with seeded random dice; the seed is derived from `label`.
pub fn seeded_flow(label: &str) -> GameFlowService<InMemoryStore> {
    flow_with(Arc::new(RngDice::new(Some(test_seed(label)))))
}

pub fn ai_kind(difficulty: Difficulty, seed: u64) -> PlayerKind {
    PlayerKind::Ai {
        registry_name: Heuristic::NAME.to_owned(),
        difficulty,
        config: Some(json!({ "seed": seed })),
    }
}

pub struct TestGame {
    pub flow: GameFlowService<InMemoryStore>,
    pub game_id: GameId,
}

/// Create a game and seat `first` (red+green) then `second` (blue+yellow).
pub async fn started_game(
    flow: GameFlowService<InMemoryStore>,
    first: PlayerKind,
    second: PlayerKind,
) -> Result<TestGame, AppError> {
    let game = flow.create_game().await?;
    flow.join_game(game.id, FIRST, "first", first).await?;
    flow.join_game(game.id, SECOND, "second", second).await?;
    Ok(TestGame {
        flow,
        game_id: game.id,
    })
}
