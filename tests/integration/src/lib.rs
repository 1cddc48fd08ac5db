//! Integration test utilities for the board state crates
//!
//! Provides fixtures and context builders for end-to-end scenarios that
//! drive both stores through `BoardContext`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
