//! Backgammon.
//!
//! Points are numbered 0..23. Seat 0 moves from 23 toward 0 and bears off
//! from its home board 0..5; seat 1 moves from 0 toward 23 with home 18..23.
//!
//! Dice come from the state's seed through [`Backgammon::roll`], or from a
//! caller through [`Backgammon::set_dice`]. Each move plays one die. The
//! doubling cube and the rule forcing use of both dice are not modelled.

mod game;

pub use game::{Backgammon, BackgammonMove, BackgammonState, Dest, Source, CHECKERS, POINTS};
