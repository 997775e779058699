//! Checkers (8×8 draughts).
//!
//! Men move and capture diagonally forward, kings in all four directions.
//! Captures are mandatory and a move is a full jump chain. A man reaching
//! the far row mid-chain is crowned and continues as a king. A side with no
//! pieces or no legal move loses.

mod game;

pub use game::{Captures, Checker, Checkers, CheckersBoard, CheckersMove, CheckersState};
