//! Binds the seeded generator to the games that roll between moves.
//!
//! Backgammon rolls two dice and Ludo one. The advanced seed is written
//! back into the returned state so the next roll continues the sequence.
//! Dominoes consumes its seed once in `init` and never rolls.

use tracing::debug;

use super::MatchState;
use crate::core::error::{EngineError, Result};
use crate::core::rng::Dice;
use crate::games::backgammon::Backgammon;
use crate::games::ludo::Ludo;

/// Roll for the seat to act.
///
/// Returns the rolled values and the next state. When no legal move follows
/// the roll, the returned state has already passed the turn. Fails with
/// `MatchEnded` once the match is over.
pub fn roll_dice(state: &MatchState) -> Result<(Dice, MatchState)> {
    super::ensure_in_progress(state)?;
    let (dice, next) = match state {
        MatchState::Backgammon(s) => {
            let (dice, next) = Backgammon.roll(s)?;
            (dice, MatchState::Backgammon(next))
        }
        MatchState::Ludo(s) => {
            let (die, next) = Ludo.roll(s)?;
            (Dice::from_slice(&[die]), MatchState::Ludo(next))
        }
        other => return Err(EngineError::DiceNotUsed { game: other.game() }),
    };
    debug!(game = %state.game(), player = %super::current_player(state), dice = ?dice.as_slice(), "dice rolled");
    Ok((dice, next))
}

/// Install dice chosen outside the generator, leaving the seed untouched.
///
/// Backgammon takes two values and Ludo one, each in `1..=6`.
pub fn set_dice(state: &MatchState, dice: &[u8]) -> Result<MatchState> {
    super::ensure_in_progress(state)?;
    let next = match state {
        MatchState::Backgammon(s) => MatchState::Backgammon(Backgammon.set_dice(s, dice)?),
        MatchState::Ludo(s) => MatchState::Ludo(Ludo.set_dice(s, dice)?),
        other => return Err(EngineError::DiceNotUsed { game: other.game() }),
    };
    debug!(game = %state.game(), dice = ?dice, "dice set");
    Ok(next)
}
