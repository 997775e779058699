//! # rust-tabletop
//!
//! A deterministic rules engine for wagered board games: Chess, Checkers,
//! Backgammon, Ludo and Dominoes.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Identical inputs give byte-identical states on any
//!    platform. All randomness flows from one external seed through an
//!    integer LCG; there is no clock, float, or ambient generator.
//!
//! 2. **Immutable States**: `apply_move` returns a new state. A state value
//!    is never modified once produced, so replay and hashing can trust it.
//!
//! 3. **Isolated Games**: Each game is its own state machine behind the
//!    `RulesEngine` trait. Games share building blocks, never state.
//!
//! ## Architecture
//!
//! - **Dispatch Facade**: `MatchState` and `MatchMove` are closed enums over
//!   the five games. External callers only need `dispatch`.
//!
//! - **Seed Threading**: Games that roll carry their seed in state; each roll
//!   returns the advanced seed inside the next state.
//!
//! - **Audit**: States hash to a SHA-256 digest over alphabetically keyed
//!   JSON, and a `MatchLog` replays to the same digest.
//!
//! ## Modules
//!
//! - `core`: Seats, seeds and the generator, configuration, errors, hashing
//! - `rules`: `RulesEngine` trait and `GameResult`
//! - `games`: The five rule modules
//! - `dispatch`: Facade, dice bridge, wire codec
//! - `replay`: Match log replay

pub mod core;
pub mod rules;
pub mod games;
pub mod dispatch;
pub mod replay;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    Dice, Seed,
    GameId, MatchConfig,
    EngineError, Result,
    state_digest, StateDigest,
};

pub use crate::rules::{RulesEngine, GameResult, Settlement};

pub use crate::games::{Backgammon, Checkers, Chess, Dominoes, Ludo, Square};

pub use crate::dispatch::{MatchMove, MatchState};

pub use crate::replay::{replay, LogEvent, MatchLog, ReplayError, ReplayOutcome};
