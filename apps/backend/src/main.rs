//! `ludo-sim`: plays one all-AI match against the in-memory store.
//!
//! Environment:
//! - `LUDO_SIM_SEED`: seed for dice and both AI seats (random when unset)
//! - `LUDO_SIM_TIMEOUT_SECS`: give up after this long (default 300)
//! - the `LUDO_*` engine variables read by `EngineConfig::from_env`; think
//!   time defaults to zero here unless `LUDO_AI_THINK_MS` is set

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use ludo_backend::ai::Heuristic;
use ludo_backend::domain::{Difficulty, GameId, GameStatus, PlayerKind, RngDice};
use ludo_backend::store::{require_game, GameChange};
use ludo_backend::telemetry;
use ludo_backend::{
    AiCoordinator, AppError, EngineConfig, GameFlowService, GameStore, InMemoryStore,
};
use serde_json::json;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Idle time after which the watchdog repairs and resumes the game.
const WATCHDOG_IDLE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = %e.code(), error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let mut config = EngineConfig::from_env()?;
    if env::var_os("LUDO_AI_THINK_MS").is_none() {
        config.think_time = Duration::ZERO;
    }
    let seed = optional_u64("LUDO_SIM_SEED")?;
    let timeout = Duration::from_secs(
        optional_u64("LUDO_SIM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
    );

    let store = Arc::new(InMemoryStore::new());
    let flow = GameFlowService::new(
        Arc::clone(&store),
        Arc::new(RngDice::new(seed)),
        config.clone(),
    );
    let coordinator = Arc::new(AiCoordinator::new(flow.clone()));
    let shutdown = CancellationToken::new();
    let worker = Arc::clone(&coordinator).spawn(shutdown.clone());

    let game = flow.create_game().await?;
    info!(game_id = game.id, ?config, ?seed, "Starting simulation");

    let finished = tokio::time::timeout(timeout, async {
        let mut changes = store.subscribe();
        flow.join_game(game.id, 1, "Hard Heuristic", ai_seat(Difficulty::Hard, seed, 1))
            .await?;
        flow.join_game(game.id, 2, "Easy Heuristic", ai_seat(Difficulty::Easy, seed, 2))
            .await?;
        watch_until_finished(&coordinator, &mut changes, game.id).await
    })
    .await;

    shutdown.cancel();
    if let Err(e) = worker.await {
        warn!(error = %e, "Coordinator task ended abnormally");
    }

    match finished {
        Ok(result) => result?,
        Err(_) => {
            return Err(AppError::internal(format!(
                "game {} did not finish within {timeout:?}",
                game.id
            )))
        }
    }

    let doc = require_game(store.as_ref(), game.id).await?;
    for player in &doc.state.players {
        info!(
            game_id = doc.id,
            player_id = player.id,
            name = %player.name,
            captures = player.captures,
            finishes = player.finishes,
            "Final tally"
        );
    }
    info!(
        game_id = doc.id,
        winner = ?doc.state.winner,
        version = doc.version,
        "Simulation finished"
    );
    Ok(())
}

async fn watch_until_finished(
    coordinator: &AiCoordinator<InMemoryStore>,
    changes: &mut broadcast::Receiver<GameChange>,
    game_id: GameId,
) -> Result<(), AppError> {
    loop {
        match tokio::time::timeout(WATCHDOG_IDLE, changes.recv()).await {
            Ok(Ok(change)) if change.game_id == game_id => {
                if change.after.state.status == GameStatus::Finished {
                    return Ok(());
                }
            }
            Ok(Ok(_)) => {}
            Ok(Err(RecvError::Lagged(skipped))) => {
                warn!(skipped, "Simulation watcher lagged");
            }
            Ok(Err(RecvError::Closed)) => {
                return Err(AppError::internal("change feed closed"));
            }
            Err(_) => {
                let doc = require_game(coordinator.flow().store().as_ref(), game_id).await?;
                if doc.state.status == GameStatus::Finished {
                    return Ok(());
                }
                warn!(
                    game_id,
                    version = doc.version,
                    "No progress, repairing and resuming"
                );
                coordinator
                    .flow()
                    .repair_stale_lock(game_id, None)
                    .await?;
                let outcome = coordinator.resume(game_id).await?;
                info!(game_id, ?outcome, "Watchdog resumed game");
            }
        }
    }
}

fn ai_seat(difficulty: Difficulty, seed: Option<u64>, seat: u64) -> PlayerKind {
    PlayerKind::Ai {
        registry_name: Heuristic::NAME.to_owned(),
        difficulty,
        config: seed.map(|s| json!({ "seed": s.wrapping_add(seat) })),
    }
}

fn optional_u64(name: &str) -> Result<Option<u64>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config(format!("{name} is invalid ('{raw}'): {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
