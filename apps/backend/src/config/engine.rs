//! Engine tuning loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_THINK_MS: u64 = 1_500;
const DEFAULT_DICE_PER_ROLL: u8 = 2;
const DEFAULT_STALE_LOCK_SECS: u64 = 30;
const DEFAULT_ADVISOR_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause before an automated player acts.
    pub think_time: Duration,
    /// Dice per roll; 1 or 2.
    pub dice_per_roll: u8,
    /// Age after which a held processing flag may be force-cleared.
    pub stale_lock_after: Duration,
    /// Budget for one external advisor call.
    pub advisor_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            think_time: Duration::from_millis(DEFAULT_THINK_MS),
            dice_per_roll: DEFAULT_DICE_PER_ROLL,
            stale_lock_after: Duration::from_secs(DEFAULT_STALE_LOCK_SECS),
            advisor_timeout: Duration::from_millis(DEFAULT_ADVISOR_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Load from `LUDO_AI_THINK_MS`, `LUDO_DICE_PER_ROLL`,
    /// `LUDO_STALE_LOCK_SECS` and `LUDO_ADVISOR_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let think_ms = parse_var(&lookup, "LUDO_AI_THINK_MS", DEFAULT_THINK_MS)?;
        let dice_per_roll = parse_var(&lookup, "LUDO_DICE_PER_ROLL", DEFAULT_DICE_PER_ROLL)?;
        let stale_secs = parse_var(&lookup, "LUDO_STALE_LOCK_SECS", DEFAULT_STALE_LOCK_SECS)?;
        let advisor_ms = parse_var(
            &lookup,
            "LUDO_ADVISOR_TIMEOUT_MS",
            DEFAULT_ADVISOR_TIMEOUT_MS,
        )?;

        let config = Self {
            think_time: Duration::from_millis(think_ms),
            dice_per_roll,
            stale_lock_after: Duration::from_secs(stale_secs),
            advisor_timeout: Duration::from_millis(advisor_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=2).contains(&self.dice_per_roll) {
            return Err(AppError::config(format!(
                "LUDO_DICE_PER_ROLL must be 1 or 2, got {}",
                self.dice_per_roll
            )));
        }
        if self.stale_lock_after.is_zero() {
            return Err(AppError::config("LUDO_STALE_LOCK_SECS must be positive"));
        }
        if self.advisor_timeout.is_zero() {
            return Err(AppError::config("LUDO_ADVISOR_TIMEOUT_MS must be positive"));
        }
        Ok(())
    }

    /// No pacing delay; for tests and simulations.
    pub fn instant() -> Self {
        Self {
            think_time: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("{name} is invalid ('{raw}'): {e}"))),
    }
}
