//! Core engine types: seats, seeds, configuration, errors, hashing.
//!
//! This module holds the pieces every game shares. Games never share
//! state with each other, only these building blocks.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod hash;

pub use player::{PlayerId, PlayerMap};
pub use rng::{Dice, Seed};
pub use config::{GameId, MatchConfig};
pub use error::{EngineError, Result};
pub use hash::{state_digest, StateDigest};
