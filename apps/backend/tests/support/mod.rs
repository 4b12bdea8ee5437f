#![allow(dead_code)]

//! Shared fixtures for integration tests.

pub mod game_setup;
pub mod wait;

pub use game_setup::{
    ai_kind, scripted_flow, seeded_flow, started_game, TestGame, FIRST, SECOND,
};
pub use wait::wait_for;
