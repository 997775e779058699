//! Shared helpers for integration tests.

#![allow(dead_code)]

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rust_tabletop::core::{GameId, MatchConfig};
use rust_tabletop::dispatch::{self, MatchMove, MatchState};
use rust_tabletop::rules::GameResult;

/// One random match, every intermediate state kept.
pub struct Playout {
    pub states: Vec<MatchState>,
    pub moves: Vec<MatchMove>,
    pub result: GameResult,
}

impl Playout {
    pub fn last(&self) -> &MatchState {
        self.states.last().expect("playout keeps the initial state")
    }
}

/// Smallest seat count a game accepts.
pub fn min_players(game: GameId) -> usize {
    game.player_range().0
}

/// Play uniformly random legal moves, rolling whenever no move is pending.
///
/// Move choice comes from `choice_seed` so a playout is reproducible.
pub fn playout(game: GameId, players: usize, seed: u64, choice_seed: u64, max_steps: usize) -> Playout {
    let mut rng = ChaCha8Rng::seed_from_u64(choice_seed);
    let mut state = MatchConfig::new(game, players)
        .with_seed(seed)
        .start()
        .expect("valid match config");
    let mut states = vec![state.clone()];
    let mut moves = Vec::new();

    for _ in 0..max_steps {
        if dispatch::is_terminal(&state).is_ended() {
            break;
        }
        let legal = dispatch::legal_moves(&state);
        state = match legal.choose(&mut rng) {
            Some(mv) => {
                moves.push(mv.clone());
                dispatch::apply_move(&state, mv).expect("legal move applies")
            }
            None => dispatch::roll_dice(&state).expect("roll with no pending move").1,
        };
        states.push(state.clone());
    }

    let result = dispatch::is_terminal(&state);
    Playout {
        states,
        moves,
        result,
    }
}
