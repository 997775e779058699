//! Dominoes, double-six block/draw game for two to four seats.
//!
//! The set is shuffled once from the seed and dealt in contiguous hands.
//! A player who cannot match an end draws from the boneyard, or passes once
//! it is empty. Emptying a hand wins; a blocked table goes to the lowest pip
//! count, or is drawn on a tie.

mod game;

pub use game::{
    hand_size, Dominoes, DominoesMove, DominoesState, End, Tile, DRAW_INDEX, MAX_PIPS, PASS_INDEX,
};
