#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::game_flow::{AiCoordinator, GameFlowService};
pub use store::{GameDocument, GameStore, InMemoryStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
