//! Backend test support utilities
//!
//! This crate provides utilities shared by the backend's unit and integration
//! tests: unified logging initialization and deterministic per-test seeds.

pub mod logging;
pub mod seeds;
