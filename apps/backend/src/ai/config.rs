//! AI configuration handling.
//!
//! Provides a typed view over the optional JSON config carried by an AI seat,
//! extracting standard fields while preserving AI-specific custom fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::Difficulty;

/// Standard configuration for AI players.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "difficulty": "hard", "temperature": 0.2}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// RNG seed for reproducible jitter and tie-breaks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Overrides the difficulty stored on the seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Everything else, left for the AI implementation to interpret.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Parse from an optional JSON value. Malformed config yields an empty one.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Configured difficulty, falling back to `seat`.
    pub fn difficulty_or(&self, seat: Difficulty) -> Difficulty {
        self.difficulty.unwrap_or(seat)
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            difficulty: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::empty()
    }
}
