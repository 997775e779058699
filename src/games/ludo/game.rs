//! Ludo rules: leaving base on a six, captures, safe squares, six streaks.

use serde::{Deserialize, Serialize};

use crate::core::config::GameId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{self, Seed};
use crate::rules::{GameResult, RulesEngine};

/// Tokens per seat.
pub const TOKENS: usize = 4;

/// Progress of a token still in base.
pub const BASE: i8 = -1;

/// Last progress on the shared track.
pub const LAST_TRACK: i8 = 50;

/// Progress of a token that has finished.
pub const FINISHED: i8 = 56;

/// Squares on the shared track.
pub const TRACK_LEN: u8 = 52;

/// Distance between neighbouring seats' start squares.
pub const START_STRIDE: u8 = 13;

/// Safe squares besides the four start squares.
const STAR_SQUARES: [u8; 4] = [8, 21, 34, 47];

/// Sixes in a row that forfeit the bonus.
const SIX_STREAK_LIMIT: u8 = 3;

/// Move a token. `steps == 0` brings a token out of base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LudoMove {
    pub token_index: u8,
    pub steps: u8,
}

/// Ludo position.
///
/// Token progress is counted from the seat's own start square: `-1` in base,
/// `0..=50` on the shared track, `51..=55` in the home column, `56` finished.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LudoState {
    pub tokens: PlayerMap<[i8; TOKENS]>,
    pub turn: PlayerId,
    /// Die waiting to be played. `None` until rolled.
    pub die: Option<u8>,
    pub consecutive_sixes: u8,
    pub seed: Seed,
}

impl LudoState {
    /// Every token in base, seat 0 to roll.
    #[must_use]
    pub fn new(player_count: usize, seed: Seed) -> Self {
        Self {
            tokens: PlayerMap::with_value(player_count, [BASE; TOKENS]),
            turn: PlayerId::new(0),
            die: None,
            consecutive_sixes: 0,
            seed,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.tokens.player_count()
    }
}

/// Track square of a seat's token, if it is on the shared track.
#[must_use]
pub fn track_square(seat: PlayerId, progress: i8) -> Option<u8> {
    if (0..=LAST_TRACK).contains(&progress) {
        Some((START_STRIDE * seat.0 + progress.unsigned_abs()) % TRACK_LEN)
    } else {
        None
    }
}

/// Whether a track square protects its occupants from capture.
#[must_use]
pub fn is_safe(square: u8) -> bool {
    square % START_STRIDE == 0 || STAR_SQUARES.contains(&square)
}

/// Ludo rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ludo;

impl Ludo {
    /// Roll one die from the state's seed.
    ///
    /// A roll with no legal move forfeits the turn and resets the six streak.
    pub fn roll(&self, state: &LudoState) -> Result<(u8, LudoState)> {
        if state.die.is_some() {
            return Err(EngineError::DiceAlreadyRolled { game: GameId::Ludo });
        }
        let (die, seed) = rng::roll_die(state.seed);
        let next = LudoState {
            seed,
            ..state.clone()
        };
        Ok((die, self.with_die(next, die)))
    }

    /// Install an externally chosen die without touching the seed.
    pub fn set_dice(&self, state: &LudoState, dice: &[u8]) -> Result<LudoState> {
        if state.die.is_some() {
            return Err(EngineError::DiceAlreadyRolled { game: GameId::Ludo });
        }
        match dice {
            [die] if (1..=6).contains(die) => Ok(self.with_die(state.clone(), *die)),
            _ => Err(EngineError::InvalidDice {
                game: GameId::Ludo,
                dice: dice.to_vec(),
            }),
        }
    }

    fn with_die(&self, state: LudoState, die: u8) -> LudoState {
        let state = LudoState {
            die: Some(die),
            ..state
        };
        if self.legal_moves(&state).is_empty() {
            LudoState {
                turn: state.turn.next(state.player_count()),
                die: None,
                consecutive_sixes: 0,
                ..state
            }
        } else {
            state
        }
    }

    /// Progress a token reaches with `die`, if the move is legal.
    fn destination(tokens: &[i8; TOKENS], index: usize, die: u8) -> Option<i8> {
        let progress = *tokens.get(index)?;
        let landed = match progress {
            BASE if die == 6 => 0,
            BASE | FINISHED => return None,
            _ => progress + die as i8,
        };
        let blocked = landed != FINISHED && tokens.contains(&landed);
        (landed <= FINISHED && !blocked).then_some(landed)
    }
}

impl RulesEngine for Ludo {
    type State = LudoState;
    type Move = LudoMove;

    fn game(&self) -> GameId {
        GameId::Ludo
    }

    fn init(&self, player_count: usize, seed: Option<Seed>) -> Result<LudoState> {
        GameId::Ludo.check_player_count(player_count)?;
        let seed = GameId::Ludo.require_seed(seed)?;
        Ok(LudoState::new(player_count, seed))
    }

    fn current_player(&self, state: &LudoState) -> PlayerId {
        state.turn
    }

    fn legal_moves(&self, state: &LudoState) -> Vec<LudoMove> {
        let Some(die) = state.die else {
            return Vec::new();
        };
        let tokens = &state.tokens[state.turn];
        (0..TOKENS)
            .filter_map(|index| {
                Self::destination(tokens, index, die).map(|_| LudoMove {
                    token_index: index as u8,
                    steps: if tokens[index] == BASE { 0 } else { die },
                })
            })
            .collect()
    }

    fn apply_move(&self, state: &LudoState, mv: &LudoMove) -> LudoState {
        let Some(die) = state.die else {
            return state.clone();
        };
        let seat = state.turn;
        let index = usize::from(mv.token_index);
        let Some(landed) = Self::destination(&state.tokens[seat], index, die) else {
            return state.clone();
        };

        let mut next = state.clone();
        next.tokens[seat][index] = landed;
        next.die = None;

        let mut captured = false;
        if let Some(square) = track_square(seat, landed).filter(|sq| !is_safe(*sq)) {
            for other in PlayerId::all(state.player_count()).filter(|p| *p != seat) {
                for progress in next.tokens[other].iter_mut() {
                    if track_square(other, *progress) == Some(square) {
                        *progress = BASE;
                        captured = true;
                    }
                }
            }
        }

        next.consecutive_sixes = if die == 6 {
            state.consecutive_sixes + 1
        } else {
            0
        };

        if next.consecutive_sixes >= SIX_STREAK_LIMIT {
            next.tokens[seat][index] = BASE;
            next.consecutive_sixes = 0;
            next.turn = seat.next(state.player_count());
        } else if die != 6 && !captured {
            next.turn = seat.next(state.player_count());
        }
        next
    }

    fn is_terminal(&self, state: &LudoState) -> GameResult {
        PlayerId::all(state.player_count())
            .find(|seat| state.tokens[*seat].iter().all(|p| *p == FINISHED))
            .map_or(GameResult::InProgress, GameResult::Winner)
    }
}
