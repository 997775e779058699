//! Unified facade over the five rule modules.
//!
//! `MatchState` and `MatchMove` are closed enums with one variant per game.
//! Every call routes to the matching `RulesEngine`; a state or move of the
//! wrong game is rejected, never coerced.
//!
//! ## Example
//!
//! ```
//! use rust_tabletop::core::{GameId, PlayerId};
//! use rust_tabletop::dispatch;
//!
//! let state = dispatch::init(GameId::Chess, 2, None).unwrap();
//! let moves = dispatch::legal_moves(&state);
//! assert_eq!(moves.len(), 20);
//!
//! let next = dispatch::apply_move(&state, &moves[0]).unwrap();
//! assert_eq!(dispatch::current_player(&next), PlayerId::new(1));
//! ```

pub mod dice;
pub mod wire;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::GameId;
use crate::core::error::{EngineError, Result};
use crate::core::hash::{state_digest, StateDigest};
use crate::core::player::PlayerId;
use crate::core::rng::Seed;
use crate::games::backgammon::{Backgammon, BackgammonMove, BackgammonState};
use crate::games::checkers::{Checkers, CheckersMove, CheckersState};
use crate::games::chess::{Chess, ChessMove, ChessState};
use crate::games::dominoes::{Dominoes, DominoesMove, DominoesState};
use crate::games::ludo::{Ludo, LudoMove, LudoState};
use crate::rules::{GameResult, RulesEngine};

pub use dice::{roll_dice, set_dice};
pub use wire::{decode_move, encode_move};

/// Live state of a match of any game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    Chess(ChessState),
    Checkers(CheckersState),
    Backgammon(BackgammonState),
    Ludo(LudoState),
    Dominoes(DominoesState),
}

impl MatchState {
    /// Which game this state belongs to.
    #[must_use]
    pub fn game(&self) -> GameId {
        match self {
            Self::Chess(_) => GameId::Chess,
            Self::Checkers(_) => GameId::Checkers,
            Self::Backgammon(_) => GameId::Backgammon,
            Self::Ludo(_) => GameId::Ludo,
            Self::Dominoes(_) => GameId::Dominoes,
        }
    }

    /// SHA-256 over the per-game state with keys in alphabetical order.
    pub fn digest(&self) -> Result<StateDigest> {
        match self {
            Self::Chess(s) => state_digest(s),
            Self::Checkers(s) => state_digest(s),
            Self::Backgammon(s) => state_digest(s),
            Self::Ludo(s) => state_digest(s),
            Self::Dominoes(s) => state_digest(s),
        }
    }

    /// Encode to compact bytes for storage between turns.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot written by `to_snapshot`.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A move of any game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMove {
    Chess(ChessMove),
    Checkers(CheckersMove),
    Backgammon(BackgammonMove),
    Ludo(LudoMove),
    Dominoes(DominoesMove),
}

impl MatchMove {
    /// Which game this move belongs to.
    #[must_use]
    pub fn game(&self) -> GameId {
        match self {
            Self::Chess(_) => GameId::Chess,
            Self::Checkers(_) => GameId::Checkers,
            Self::Backgammon(_) => GameId::Backgammon,
            Self::Ludo(_) => GameId::Ludo,
            Self::Dominoes(_) => GameId::Dominoes,
        }
    }
}

/// Build the starting state for a game.
///
/// Backgammon, Ludo and Dominoes fail with `MissingSeed` without a seed.
pub fn init(game: GameId, player_count: usize, seed: Option<Seed>) -> Result<MatchState> {
    let state = match game {
        GameId::Chess => MatchState::Chess(Chess.init(player_count, seed)?),
        GameId::Checkers => MatchState::Checkers(Checkers.init(player_count, seed)?),
        GameId::Backgammon => MatchState::Backgammon(Backgammon.init(player_count, seed)?),
        GameId::Ludo => MatchState::Ludo(Ludo.init(player_count, seed)?),
        GameId::Dominoes => MatchState::Dominoes(Dominoes.init(player_count, seed)?),
    };
    debug!(game = %game, players = player_count, seed = ?seed.map(Seed::value), "match initialised");
    Ok(state)
}

/// Build the starting state from a raw game id (1..=5).
pub fn init_by_id(game_id: u8, player_count: usize, seed: Option<Seed>) -> Result<MatchState> {
    init(GameId::try_from(game_id)?, player_count, seed)
}

/// Which game a state belongs to.
#[must_use]
pub fn game_of(state: &MatchState) -> GameId {
    state.game()
}

/// Seat whose turn it is.
#[must_use]
pub fn current_player(state: &MatchState) -> PlayerId {
    match state {
        MatchState::Chess(s) => Chess.current_player(s),
        MatchState::Checkers(s) => Checkers.current_player(s),
        MatchState::Backgammon(s) => Backgammon.current_player(s),
        MatchState::Ludo(s) => Ludo.current_player(s),
        MatchState::Dominoes(s) => Dominoes.current_player(s),
    }
}

/// Legal moves for the seat to act, in the game's stable order.
///
/// Empty once the match has ended.
#[must_use]
pub fn legal_moves(state: &MatchState) -> Vec<MatchMove> {
    if is_terminal(state).is_ended() {
        return Vec::new();
    }
    match state {
        MatchState::Chess(s) => Chess.legal_moves(s).into_iter().map(MatchMove::Chess).collect(),
        MatchState::Checkers(s) => Checkers
            .legal_moves(s)
            .into_iter()
            .map(MatchMove::Checkers)
            .collect(),
        MatchState::Backgammon(s) => Backgammon
            .legal_moves(s)
            .into_iter()
            .map(MatchMove::Backgammon)
            .collect(),
        MatchState::Ludo(s) => Ludo.legal_moves(s).into_iter().map(MatchMove::Ludo).collect(),
        MatchState::Dominoes(s) => Dominoes
            .legal_moves(s)
            .into_iter()
            .map(MatchMove::Dominoes)
            .collect(),
    }
}

/// Whether `player` may make `mv` now. A move of another game, or any move
/// after the match has ended, is never valid.
#[must_use]
pub fn validate_move(state: &MatchState, mv: &MatchMove, player: PlayerId) -> bool {
    if is_terminal(state).is_ended() {
        return false;
    }
    match (state, mv) {
        (MatchState::Chess(s), MatchMove::Chess(m)) => Chess.validate_move(s, m, player),
        (MatchState::Checkers(s), MatchMove::Checkers(m)) => Checkers.validate_move(s, m, player),
        (MatchState::Backgammon(s), MatchMove::Backgammon(m)) => {
            Backgammon.validate_move(s, m, player)
        }
        (MatchState::Ludo(s), MatchMove::Ludo(m)) => Ludo.validate_move(s, m, player),
        (MatchState::Dominoes(s), MatchMove::Dominoes(m)) => Dominoes.validate_move(s, m, player),
        _ => false,
    }
}

/// Validate `mv` for the seat to act, then apply it.
///
/// Returns `GameMismatch` for a move of another game, `MatchEnded` once the
/// match is over, and `IllegalMove` for one `validate_move` rejects. The
/// input state is never modified.
pub fn apply_move(state: &MatchState, mv: &MatchMove) -> Result<MatchState> {
    let game = state.game();
    if mv.game() != game {
        warn!(expected = %game, found = %mv.game(), "move for another game");
        return Err(EngineError::GameMismatch {
            expected: game,
            found: mv.game(),
        });
    }

    ensure_in_progress(state)?;

    let player = current_player(state);
    if !validate_move(state, mv, player) {
        warn!(game = %game, player = %player, mv = ?mv, "rejected unvalidated move");
        return Err(EngineError::IllegalMove { player });
    }

    let next = match (state, mv) {
        (MatchState::Chess(s), MatchMove::Chess(m)) => MatchState::Chess(Chess.apply_move(s, m)),
        (MatchState::Checkers(s), MatchMove::Checkers(m)) => {
            MatchState::Checkers(Checkers.apply_move(s, m))
        }
        (MatchState::Backgammon(s), MatchMove::Backgammon(m)) => {
            MatchState::Backgammon(Backgammon.apply_move(s, m))
        }
        (MatchState::Ludo(s), MatchMove::Ludo(m)) => MatchState::Ludo(Ludo.apply_move(s, m)),
        (MatchState::Dominoes(s), MatchMove::Dominoes(m)) => {
            MatchState::Dominoes(Dominoes.apply_move(s, m))
        }
        _ => {
            return Err(EngineError::GameMismatch {
                expected: game,
                found: mv.game(),
            })
        }
    };

    debug!(game = %game, player = %player, mv = ?mv, next = %current_player(&next), "move applied");
    Ok(next)
}

/// Terminal status of a state.
#[must_use]
pub fn is_terminal(state: &MatchState) -> GameResult {
    match state {
        MatchState::Chess(s) => Chess.is_terminal(s),
        MatchState::Checkers(s) => Checkers.is_terminal(s),
        MatchState::Backgammon(s) => Backgammon.is_terminal(s),
        MatchState::Ludo(s) => Ludo.is_terminal(s),
        MatchState::Dominoes(s) => Dominoes.is_terminal(s),
    }
}

/// Fail with `MatchEnded` when the state is terminal.
pub(crate) fn ensure_in_progress(state: &MatchState) -> Result<()> {
    let result = is_terminal(state);
    if result.is_ended() {
        warn!(game = %state.game(), result = ?result, "match already ended");
        return Err(EngineError::MatchEnded { game: state.game() });
    }
    Ok(())
}
