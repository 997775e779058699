//! Audit replay of a recorded match.
//!
//! A `MatchLog` holds the match configuration and every event in order:
//! seeded rolls, externally set dice, and wire moves. Replaying re-runs the
//! events through the dispatch facade, so a log either reproduces the same
//! final state and digest or stops at the first event that does not fit.
//!
//! ```json
//! {
//!   "config": { "game": 3, "playerCount": 2, "seed": 42 },
//!   "events": [
//!     { "type": "roll", "expect": [2, 5] },
//!     { "type": "move", "move": { "from": 12, "to": 10, "die": 2 } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::MatchConfig;
use crate::core::error::EngineError;
use crate::core::hash::StateDigest;
use crate::dispatch::{self, MatchMove, MatchState};
use crate::rules::GameResult;

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogEvent {
    /// Roll from the state's seed. `expect` pins the values the log saw.
    Roll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<Vec<u8>>,
    },
    /// Dice supplied from outside the generator.
    SetDice { dice: Vec<u8> },
    /// A move in its game's wire format.
    Move {
        #[serde(rename = "move")]
        mv: serde_json::Value,
    },
}

/// A recorded match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    pub config: MatchConfig,
    #[serde(default)]
    pub events: Vec<LogEvent>,
}

impl MatchLog {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
        }
    }

    /// Append a move, encoded in wire form.
    pub fn record_move(&mut self, mv: &MatchMove) -> Result<(), EngineError> {
        let raw = dispatch::encode_move(mv)?;
        let mv = serde_json::from_str(&raw)?;
        self.events.push(LogEvent::Move { mv });
        Ok(())
    }

    /// Append a seeded roll, pinning the values that came up.
    pub fn record_roll(&mut self, dice: &[u8]) {
        self.events.push(LogEvent::Roll {
            expect: Some(dice.to_vec()),
        });
    }
}

/// Replay failures. Event failures carry the zero-based event index.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReplayError {
    #[error("match setup failed: {0}")]
    Setup(#[source] EngineError),

    #[error("event {index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: EngineError,
    },

    #[error("event {index}: rolled {actual:?}, log expects {expected:?}")]
    DiceMismatch {
        index: usize,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    #[error("event {index}: match already ended")]
    AfterEnd { index: usize },

    #[error("final state could not be hashed: {0}")]
    Digest(#[source] EngineError),
}

/// Where a replay finished.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayOutcome {
    pub state: MatchState,
    pub result: GameResult,
    pub digest: StateDigest,
    pub events_applied: usize,
}

/// Re-run a log from its configuration.
pub fn replay(log: &MatchLog) -> Result<ReplayOutcome, ReplayError> {
    let game = log.config.game;
    let mut state = log.config.start().map_err(ReplayError::Setup)?;

    for (index, event) in log.events.iter().enumerate() {
        if dispatch::is_terminal(&state).is_ended() {
            return Err(ReplayError::AfterEnd { index });
        }
        let at = |source| ReplayError::Event { index, source };

        state = match event {
            LogEvent::Roll { expect } => {
                let (dice, next) = dispatch::roll_dice(&state).map_err(at)?;
                if let Some(expected) = expect.as_ref().filter(|e| e.as_slice() != dice.as_slice()) {
                    return Err(ReplayError::DiceMismatch {
                        index,
                        expected: expected.clone(),
                        actual: dice.to_vec(),
                    });
                }
                next
            }
            LogEvent::SetDice { dice } => dispatch::set_dice(&state, dice).map_err(at)?,
            LogEvent::Move { mv } => {
                let mv = dispatch::decode_move(game, &mv.to_string()).map_err(at)?;
                dispatch::apply_move(&state, &mv).map_err(at)?
            }
        };
        debug!(index, game = %game, "replayed event");
    }

    let result = dispatch::is_terminal(&state);
    let digest = state.digest().map_err(ReplayError::Digest)?;
    if result.is_ended() {
        info!(game = %game, winner = ?result.winner_index(), digest = %digest, "replay reached a terminal state");
    }

    Ok(ReplayOutcome {
        state,
        result,
        digest,
        events_applied: log.events.len(),
    })
}
