//! Match configuration.
//!
//! - `GameId`: the closed set of supported games and their constraints
//! - `MatchConfig`: everything needed to start a match (game, seats, seed)
//!
//! Construction problems (unknown game, bad seat count, missing seed) are
//! reported here, before any rule module runs.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::rng::Seed;

/// Game identifier, numbered as on the wire (`1..=5`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameId {
    Chess = 1,
    Checkers = 2,
    Backgammon = 3,
    Ludo = 4,
    Dominoes = 5,
}

impl GameId {
    /// All games in id order.
    pub const ALL: [GameId; 5] = [
        GameId::Chess,
        GameId::Checkers,
        GameId::Backgammon,
        GameId::Ludo,
        GameId::Dominoes,
    ];

    /// Wire id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chess => "Chess",
            Self::Checkers => "Checkers",
            Self::Backgammon => "Backgammon",
            Self::Ludo => "Ludo",
            Self::Dominoes => "Dominoes",
        }
    }

    /// Supported seat counts, inclusive.
    #[must_use]
    pub const fn player_range(self) -> (usize, usize) {
        match self {
            Self::Chess | Self::Checkers | Self::Backgammon => (2, 2),
            Self::Ludo | Self::Dominoes => (2, 4),
        }
    }

    /// Whether `init` needs an externally supplied seed.
    #[must_use]
    pub const fn requires_seed(self) -> bool {
        matches!(self, Self::Backgammon | Self::Ludo | Self::Dominoes)
    }

    /// Whether the turn structure separates rolling from moving.
    #[must_use]
    pub const fn uses_dice(self) -> bool {
        matches!(self, Self::Backgammon | Self::Ludo)
    }

    /// Check a seat count against this game's range.
    pub fn check_player_count(self, count: usize) -> Result<()> {
        let (min, max) = self.player_range();
        if (min..=max).contains(&count) {
            Ok(())
        } else {
            Err(EngineError::InvalidPlayerCount {
                game: self,
                count,
                min,
                max,
            })
        }
    }

    /// Unwrap an optional seed, failing loudly for games that need one.
    pub fn require_seed(self, seed: Option<Seed>) -> Result<Seed> {
        seed.ok_or(EngineError::MissingSeed { game: self })
    }
}

impl TryFrom<u8> for GameId {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Chess),
            2 => Ok(Self::Checkers),
            3 => Ok(Self::Backgammon),
            4 => Ok(Self::Ludo),
            5 => Ok(Self::Dominoes),
            other => Err(EngineError::UnknownGame(other)),
        }
    }
}

impl From<GameId> for u8 {
    fn from(game: GameId) -> Self {
        game.id()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for starting one match.
///
/// `seed` is the combined commit-reveal output. It is ignored by games
/// without randomness and required by the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    /// Which game to play.
    pub game: GameId,

    /// Number of seats.
    pub player_count: usize,

    /// External seed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl MatchConfig {
    /// Create a config with no seed.
    #[must_use]
    pub fn new(game: GameId, player_count: usize) -> Self {
        Self {
            game,
            player_count,
            seed: None,
        }
    }

    /// Set the external seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the seat count.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// The seed folded into the generator's range.
    #[must_use]
    pub fn generator_seed(&self) -> Option<Seed> {
        self.seed.map(Seed::from_u64)
    }

    /// Check for construction errors without starting the match.
    pub fn validate(&self) -> Result<()> {
        self.game.check_player_count(self.player_count)?;
        if self.game.requires_seed() {
            self.game.require_seed(self.generator_seed())?;
        }
        Ok(())
    }

    /// Validate and build the starting position.
    pub fn start(&self) -> Result<crate::dispatch::MatchState> {
        self.validate()?;
        crate::dispatch::init(self.game, self.player_count, self.generator_seed())
    }
}
