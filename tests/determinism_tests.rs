//! Determinism: the same seed and the same choices give the same match.

mod common;

use proptest::prelude::*;

use common::{min_players, playout};
use rust_tabletop::core::rng::{self, Seed};
use rust_tabletop::core::{GameId, MatchConfig, PlayerId};
use rust_tabletop::dispatch;
use rust_tabletop::games::dominoes::DominoesState;
use rust_tabletop::MatchState;

fn dominoes(seed: u64, players: usize) -> DominoesState {
    match MatchConfig::new(GameId::Dominoes, players).with_seed(seed).start() {
        Ok(MatchState::Dominoes(state)) => state,
        other => panic!("expected a dominoes state, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn replaying_a_playout_is_byte_identical(
        game_index in 0usize..5,
        seed in any::<u64>(),
        choice in any::<u64>(),
    ) {
        let game = GameId::ALL[game_index];
        let first = playout(game, min_players(game), seed, choice, 300);
        let second = playout(game, min_players(game), seed, choice, 300);

        prop_assert_eq!(first.states.len(), second.states.len());
        prop_assert_eq!(first.result, second.result);
        for (a, b) in first.states.iter().zip(&second.states) {
            prop_assert_eq!(a.to_snapshot().unwrap(), b.to_snapshot().unwrap());
            prop_assert_eq!(a.digest().unwrap(), b.digest().unwrap());
        }
    }

    #[test]
    fn move_log_reproduces_final_state(seed in any::<u64>(), choice in any::<u64>()) {
        let game = GameId::Chess;
        let run = playout(game, 2, seed, choice, 120);

        let mut state = dispatch::init(game, 2, None).unwrap();
        for mv in &run.moves {
            state = dispatch::apply_move(&state, mv).unwrap();
        }
        prop_assert_eq!(&state, run.last());
    }

    #[test]
    fn dice_are_always_one_to_six(seed in any::<u32>(), n in 0usize..16) {
        let (dice, _) = rng::roll_dice(Seed::new(seed), n);
        prop_assert_eq!(dice.len(), n);
        prop_assert!(dice.iter().all(|d| (1..=6).contains(d)));
    }

    #[test]
    fn roll_threads_the_seed(seed in any::<u32>()) {
        let (all, end) = rng::roll_dice(Seed::new(seed), 4);
        let (front, mid) = rng::roll_dice(Seed::new(seed), 2);
        let (back, end2) = rng::roll_dice(mid, 2);
        prop_assert_eq!(&all[..2], front.as_slice());
        prop_assert_eq!(&all[2..], back.as_slice());
        prop_assert_eq!(end, end2);
    }

    #[test]
    fn shuffle_is_a_seeded_permutation(seed in any::<u32>(), len in 0usize..40) {
        let items: Vec<usize> = (0..len).collect();
        let (a, seed_a) = rng::shuffle(Seed::new(seed), items.clone());
        let (b, seed_b) = rng::shuffle(Seed::new(seed), items.clone());
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(seed_a, seed_b);

        let mut sorted = a;
        sorted.sort_unstable();
        prop_assert_eq!(sorted, items);
    }

    #[test]
    fn deal_is_fixed_per_seed(seed in any::<u64>(), players in 2usize..=4) {
        let a = dominoes(seed, players);
        let b = dominoes(seed, players);
        prop_assert_eq!(&a.hands, &b.hands);
        prop_assert_eq!(&a.boneyard, &b.boneyard);
    }

    #[test]
    fn one_seed_bit_changes_the_deal(seed in any::<u64>(), bit in 0u32..64) {
        let a = dominoes(seed, 2);
        let b = dominoes(seed ^ (1u64 << bit), 2);
        prop_assert_ne!(a.hands, b.hands);
    }
}

#[test]
fn test_known_opening_rolls() {
    let state = dispatch::init(GameId::Backgammon, 2, Some(Seed::new(0))).unwrap();
    let (dice, next) = dispatch::roll_dice(&state).unwrap();
    assert_eq!(dice.as_slice(), &[2, 3]);
    assert_eq!(dispatch::current_player(&next), PlayerId::new(0));

    let ludo = dispatch::init(GameId::Ludo, 2, Some(Seed::new(42))).unwrap();
    let (die, _) = dispatch::roll_dice(&ludo).unwrap();
    assert_eq!(die.as_slice(), &[2]);
}
