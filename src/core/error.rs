//! Engine error taxonomy.
//!
//! Only construction and contract violations are errors. A well-formed but
//! illegal move is not: `validate_move` answers `false` for it.

use thiserror::Error;

use super::config::GameId;
use super::player::PlayerId;

/// Errors raised by the engine facade and its construction paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown game id {0}")]
    UnknownGame(u8),

    #[error("{game} requires a seed")]
    MissingSeed { game: GameId },

    #[error("{game} supports {min}-{max} players, got {count}")]
    InvalidPlayerCount {
        game: GameId,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("expected a {expected} value, got {found}")]
    GameMismatch { expected: GameId, found: GameId },

    #[error("{game} does not use dice")]
    DiceNotUsed { game: GameId },

    #[error("{game} dice already rolled for this turn")]
    DiceAlreadyRolled { game: GameId },

    #[error("invalid dice {dice:?} for {game}")]
    InvalidDice { game: GameId, dice: Vec<u8> },

    #[error("{game} match has already ended")]
    MatchEnded { game: GameId },

    #[error("illegal move for {player}")]
    IllegalMove { player: PlayerId },

    #[error("malformed move: {0}")]
    MalformedMove(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(EngineError::UnknownGame(9).to_string(), "unknown game id 9");
        assert_eq!(
            EngineError::MissingSeed { game: GameId::Ludo }.to_string(),
            "Ludo requires a seed"
        );
        assert_eq!(
            EngineError::InvalidPlayerCount {
                game: GameId::Chess,
                count: 3,
                min: 2,
                max: 2
            }
            .to_string(),
            "Chess supports 2-2 players, got 3"
        );
        assert_eq!(
            EngineError::MatchEnded { game: GameId::Dominoes }.to_string(),
            "Dominoes match has already ended"
        );
        assert_eq!(
            EngineError::IllegalMove { player: PlayerId::new(1) }.to_string(),
            "illegal move for Player 1"
        );
    }
}
