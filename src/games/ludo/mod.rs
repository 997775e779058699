//! Ludo for two to four seats.
//!
//! Seat `n` enters the 52-square track at square `13 * n`. A token leaves
//! base on a six, runs 51 squares of track, then five of home column, and
//! finishes on an exact roll. Landing on an opposing token off a safe square
//! sends it back to base. A six or a capture earns another roll, except the
//! third six in a row, which returns the moved token to base and ends the turn.

mod game;

pub use game::{
    is_safe, track_square, Ludo, LudoMove, LudoState, BASE, FINISHED, LAST_TRACK, START_STRIDE,
    TOKENS, TRACK_LEN,
};
