//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - The starting position
//! - What moves are legal
//! - How a move produces the next state
//! - Win/draw conditions

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::core::config::GameId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::rng::Seed;

/// Terminal status of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The game continues.
    InProgress,
    /// Single winner.
    Winner(PlayerId),
    /// Drawn or blocked with no winner.
    Draw,
}

impl GameResult {
    /// Whether the game has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Winning seat, if any.
    #[must_use]
    pub fn winner_index(&self) -> Option<u8> {
        match self {
            GameResult::Winner(p) => Some(p.0),
            GameResult::InProgress | GameResult::Draw => None,
        }
    }

    /// Record handed to the settlement collaborator.
    #[must_use]
    pub fn settlement(&self) -> Settlement {
        Settlement {
            ended: self.is_ended(),
            winner_index: self.winner_index(),
            draw: matches!(self, GameResult::Draw),
        }
    }
}

/// Settlement handoff record.
///
/// `winner_index` is `None` both while the game runs and on a draw; `draw`
/// tells the two apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub ended: bool,
    pub winner_index: Option<u8>,
    pub draw: bool,
}

/// Rules engine trait.
///
/// Each game is an independent state machine over its own `State` and
/// `Move`. States are values: `apply_move` returns a new state and never
/// touches its input.
///
/// ## Implementation Notes
///
/// - `legal_moves`: same state, same order
/// - `apply_move`: only defined for moves `validate_move` accepts
/// - `is_terminal`: pure read of state counters, no history
pub trait RulesEngine {
    /// Per-game state.
    type State: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// Per-game move.
    type Move: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// Which game this engine plays.
    fn game(&self) -> GameId;

    /// Build the starting position.
    ///
    /// Seeded games fail with `MissingSeed` when `seed` is `None`.
    fn init(&self, player_count: usize, seed: Option<Seed>) -> Result<Self::State>;

    /// Seat whose turn it is.
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// All legal moves for the current player.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a validated move, returning the next state.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Check if the game is over.
    fn is_terminal(&self, state: &Self::State) -> GameResult;

    // === Convenience Methods ===

    /// Check a move against the current turn and the legal move list.
    fn validate_move(&self, state: &Self::State, mv: &Self::Move, player: PlayerId) -> bool {
        player == self.current_player(state) && self.legal_moves(state).contains(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_settlement_records() {
        assert_eq!(
            GameResult::InProgress.settlement(),
            Settlement {
                ended: false,
                winner_index: None,
                draw: false
            }
        );
        assert_eq!(
            GameResult::Winner(PlayerId::new(2)).settlement(),
            Settlement {
                ended: true,
                winner_index: Some(2),
                draw: false
            }
        );
        assert_eq!(
            GameResult::Draw.settlement(),
            Settlement {
                ended: true,
                winner_index: None,
                draw: true
            }
        );
    }

    #[test]
    fn test_settlement_wire_shape() {
        let json = serde_json::to_string(&GameResult::Winner(PlayerId::new(1)).settlement()).unwrap();
        assert_eq!(json, r#"{"ended":true,"winnerIndex":1,"draw":false}"#);
    }
}
