//! Game implementations.
//!
//! Each game is self-contained and implements `RulesEngine`. Games share
//! only the core building blocks, never state.

pub mod square;
pub mod chess;
pub mod checkers;
pub mod backgammon;
pub mod ludo;
pub mod dominoes;

pub use backgammon::Backgammon;
pub use checkers::Checkers;
pub use chess::Chess;
pub use dominoes::Dominoes;
pub use ludo::Ludo;
pub use square::Square;
