//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - The starting position
//! - Legal moves for each state
//! - How moves produce new states
//! - Win/draw conditions
//!
//! The dispatch facade calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine, Settlement};
