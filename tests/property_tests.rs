//! Invariants checked over random playouts of every game.

mod common;

use proptest::prelude::*;

use common::{min_players, playout};
use rust_tabletop::core::{EngineError, GameId, PlayerId};
use rust_tabletop::dispatch::{self, MatchState};
use rust_tabletop::games::backgammon::{Backgammon, Source, CHECKERS};
use rust_tabletop::games::checkers::Checkers;
use rust_tabletop::games::chess::{Chess, FIFTY_MOVE_LIMIT};
use rust_tabletop::games::dominoes::Dominoes;
use rust_tabletop::games::ludo::FINISHED;
use rust_tabletop::rules::{GameResult, RulesEngine};

/// Whether a game-specific terminal condition holds.
///
/// Asks the rule modules directly, since the facade lists no moves once a
/// match has ended.
fn terminal_condition(state: &MatchState) -> bool {
    match state {
        MatchState::Chess(s) => Chess.legal_moves(s).is_empty() || s.halfmove_clock >= FIFTY_MOVE_LIMIT,
        MatchState::Checkers(s) => Checkers.legal_moves(s).is_empty(),
        MatchState::Backgammon(s) => s.off.iter().any(|(_, off)| *off >= CHECKERS),
        MatchState::Ludo(s) => s
            .tokens
            .iter()
            .any(|(_, tokens)| tokens.iter().all(|p| *p == FINISHED)),
        MatchState::Dominoes(s) => {
            let seats = s.hands.player_count();
            let empty_hand = s.hands.iter().any(|(_, hand)| hand.is_empty());
            // Every seat would have to draw or pass with nothing left to draw
            let blocked = s.boneyard.is_empty()
                && PlayerId::all(seats).all(|seat| {
                    let mut turned = s.clone();
                    turned.turn = seat;
                    Dominoes.legal_moves(&turned).iter().all(|m| !m.is_play())
                });
            empty_hand || blocked
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn validate_agrees_with_legal_moves(
        game_index in 0usize..5,
        extra in 0usize..3,
        seed in any::<u64>(),
        choice in any::<u64>(),
    ) {
        let game = GameId::ALL[game_index];
        let (min, max) = game.player_range();
        let players = (min + extra).min(max);
        let run = playout(game, players, seed, choice, 200);

        for state in &run.states {
            let turn = dispatch::current_player(state);
            for mv in dispatch::legal_moves(state) {
                prop_assert!(dispatch::validate_move(state, &mv, turn));
                for other in PlayerId::all(players).filter(|p| *p != turn) {
                    prop_assert!(!dispatch::validate_move(state, &mv, other));
                }
            }
        }
    }

    #[test]
    fn terminal_only_when_a_condition_holds(
        game_index in 0usize..5,
        seed in any::<u64>(),
        choice in any::<u64>(),
    ) {
        let game = GameId::ALL[game_index];
        let run = playout(game, min_players(game), seed, choice, 400);
        for state in &run.states {
            let ended = dispatch::is_terminal(state).is_ended();
            prop_assert_eq!(ended, terminal_condition(state));
        }
    }

    #[test]
    fn checkers_capture_is_mandatory(seed in any::<u64>(), choice in any::<u64>()) {
        let run = playout(GameId::Checkers, 2, seed, choice, 200);
        for state in &run.states {
            let MatchState::Checkers(s) = state else { unreachable!() };
            let moves = Checkers.legal_moves(s);
            if moves.iter().any(|m| m.is_capture()) {
                prop_assert!(moves.iter().all(|m| m.is_capture()));
            }
        }
    }

    #[test]
    fn backgammon_bar_moves_first(seed in any::<u64>(), choice in any::<u64>()) {
        let run = playout(GameId::Backgammon, 2, seed, choice, 300);
        for state in &run.states {
            let MatchState::Backgammon(s) = state else { unreachable!() };
            if s.bar[s.turn] > 0 {
                prop_assert!(Backgammon
                    .legal_moves(s)
                    .iter()
                    .all(|m| m.from == Source::Bar));
            }
        }
    }

    #[test]
    fn states_are_never_mutated_by_apply(
        game_index in 0usize..5,
        seed in any::<u64>(),
        choice in any::<u64>(),
    ) {
        let game = GameId::ALL[game_index];
        let run = playout(game, min_players(game), seed, choice, 60);
        for state in &run.states {
            let before = state.clone();
            for mv in dispatch::legal_moves(state) {
                let _ = dispatch::apply_move(state, &mv).unwrap();
                prop_assert_eq!(state, &before);
            }
        }
    }

    #[test]
    fn ended_settlement_is_consistent(
        game_index in 0usize..5,
        seed in any::<u64>(),
        choice in any::<u64>(),
    ) {
        let game = GameId::ALL[game_index];
        let run = playout(game, min_players(game), seed, choice, 400);
        let settlement = run.result.settlement();
        if run.result.is_ended() {
            let last = run.last();
            prop_assert!(dispatch::legal_moves(last).is_empty());
            if matches!(game, GameId::Backgammon | GameId::Ludo) {
                prop_assert_eq!(
                    dispatch::roll_dice(last).map(|(_, next)| next),
                    Err(EngineError::MatchEnded { game })
                );
            }
        }
        match run.result {
            GameResult::InProgress => {
                prop_assert!(!settlement.ended);
                prop_assert_eq!(settlement.winner_index, None);
            }
            GameResult::Draw => {
                prop_assert!(settlement.ended && settlement.draw);
                prop_assert_eq!(settlement.winner_index, None);
            }
            GameResult::Winner(seat) => {
                prop_assert!(settlement.ended && !settlement.draw);
                prop_assert_eq!(settlement.winner_index, Some(seat.0));
            }
        }
    }
}
