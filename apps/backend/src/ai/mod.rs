//! AI player module - automated move decisions.
//!
//! - `AiPlayer`: synchronous move engines (`Heuristic`, `RandomPlayer`)
//! - `MoveAdvisor`: async external advisors, always wrapped in `AdvisedSelector`
//! - `registry`: static lookup of engines by name

mod advisor;
mod config;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use advisor::AdvisedSelector;
pub use config::AiConfig;
pub use heuristic::{score_move, Heuristic, Weights};
pub use random::RandomPlayer;
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, AiPlayer, MoveAdvisor};

use crate::domain::Difficulty;

/// Build a registered engine from a seat's registry name, difficulty and config.
///
/// A `difficulty` or `seed` in `config` overrides the seat values. Returns
/// `None` if `name` is not registered.
pub fn create_ai(
    name: &str,
    difficulty: Difficulty,
    config: Option<&JsonValue>,
) -> Option<Box<dyn AiPlayer + Send + Sync>> {
    let factory = registry::by_name(name)?;
    let config = AiConfig::from_json(config);
    Some((factory.make)(config.seed(), config.difficulty_or(difficulty)))
}
