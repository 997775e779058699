//! Deterministic, integer-only random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice and shuffles on every platform
//! - **Pure**: Every call returns the advanced seed; there is no hidden generator state
//! - **Integer-only**: All arithmetic is wrapping `u32`, no floating point anywhere
//!
//! The generator is a linear congruential generator over `m = 2^31`:
//!
//! ```text
//! seed' = (1664525 * seed + 1013904223) mod 2^31
//! ```
//!
//! ## Usage
//!
//! ```
//! use rust_tabletop::core::rng::{roll_dice, Seed};
//!
//! let seed = Seed::new(42);
//! let (dice, next) = roll_dice(seed, 2);
//!
//! // Replaying from the same seed gives the same dice
//! let (again, _) = roll_dice(seed, 2);
//! assert_eq!(dice, again);
//! assert_ne!(seed, next);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// LCG multiplier `a`.
pub const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment `c`.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Mask for the LCG modulus `m = 2^31`.
pub const SEED_MASK: u32 = 0x7FFF_FFFF;

/// Dice produced by a single roll. Backgammon doubles need four slots.
pub type Dice = SmallVec<[u8; 4]>;

/// A 31-bit generator seed.
///
/// Seeds originate outside the engine (commit-reveal) and are threaded
/// through state by the games that consume randomness. The engine never
/// creates a seed on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Seed(u32);

impl Seed {
    /// Create a seed, keeping the low 31 bits.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw & SEED_MASK)
    }

    /// Fold a 64-bit external seed into the generator's 31-bit range.
    ///
    /// Every input bit lands on at least one seed bit, so flipping any bit
    /// of the input changes the seed.
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        let folded = raw ^ (raw >> 31) ^ (raw >> 62);
        Self((folded as u32) & SEED_MASK)
    }

    /// Get the raw 31-bit value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Seed {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl From<Seed> for u32 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Advance the generator once.
///
/// Returns the drawn value and the advanced seed. The drawn value is the
/// new seed itself.
#[must_use]
pub const fn next(seed: Seed) -> (u32, Seed) {
    let raw = LCG_MULTIPLIER
        .wrapping_mul(seed.0)
        .wrapping_add(LCG_INCREMENT)
        & SEED_MASK;
    (raw, Seed(raw))
}

/// Roll one six-sided die.
#[must_use]
pub const fn roll_die(seed: Seed) -> (u8, Seed) {
    let (value, advanced) = next(seed);
    // value % 6 < 6, so the cast is lossless
    ((value % 6) as u8 + 1, advanced)
}

/// Roll `n` six-sided dice, one draw per die.
#[must_use]
pub fn roll_dice(seed: Seed, n: usize) -> (Dice, Seed) {
    let mut dice = Dice::new();
    let mut seed = seed;
    for _ in 0..n {
        let (die, advanced) = roll_die(seed);
        dice.push(die);
        seed = advanced;
    }
    (dice, seed)
}

/// Seeded Fisher–Yates shuffle.
///
/// Walks from the last index down to 1, consuming one draw per swap.
/// Empty and single-element inputs return the seed unchanged.
#[must_use]
pub fn shuffle<T>(seed: Seed, mut items: Vec<T>) -> (Vec<T>, Seed) {
    let mut seed = seed;
    for i in (1..items.len()).rev() {
        let (value, advanced) = next(seed);
        let j = value as usize % (i + 1);
        items.swap(i, j);
        seed = advanced;
    }
    (items, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_die_matches_roll_dice() {
        let (die, seed) = roll_die(Seed::new(42));
        let (dice, expected) = roll_dice(Seed::new(42), 1);
        assert_eq!(dice.as_slice(), &[die]);
        assert_eq!(seed, expected);
        assert_eq!(die, 2);
    }

    #[test]
    fn test_known_sequence() {
        let (v1, s1) = next(Seed::new(0));
        assert_eq!(v1, 1_013_904_223);
        let (v2, s2) = next(s1);
        assert_eq!(v2, 1_196_435_762);
        let (v3, _) = next(s2);
        assert_eq!(v3, 1_372_387_049);
    }

    #[test]
    fn test_known_dice() {
        let (dice, _) = roll_dice(Seed::new(0), 6);
        assert_eq!(dice.as_slice(), &[2, 3, 6, 1, 2, 5]);

        let (dice, _) = roll_dice(Seed::new(42), 3);
        assert_eq!(dice.as_slice(), &[2, 5, 4]);
    }

    #[test]
    fn test_determinism() {
        let seed = Seed::new(987_654);
        assert_eq!(roll_dice(seed, 50), roll_dice(seed, 50));
    }

    #[test]
    fn test_roll_threads_seed() {
        let seed = Seed::new(7);
        let (first, mid) = roll_dice(seed, 2);
        let (second, end) = roll_dice(mid, 2);
        let (all, all_end) = roll_dice(seed, 4);

        assert_eq!(&all[..2], first.as_slice());
        assert_eq!(&all[2..], second.as_slice());
        assert_eq!(end, all_end);
    }

    #[test]
    fn test_dice_range() {
        let (dice, _) = roll_dice(Seed::new(123), 500);
        assert!(dice.iter().all(|d| (1..=6).contains(d)));
    }

    #[test]
    fn test_value_stays_in_modulus() {
        let mut seed = Seed::new(SEED_MASK);
        for _ in 0..1000 {
            let (value, next_seed) = next(seed);
            assert!(value <= SEED_MASK);
            seed = next_seed;
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..28).collect();
        let (shuffled, seed) = shuffle(Seed::new(42), items.clone());

        assert_ne!(seed, Seed::new(42));
        assert_ne!(shuffled, items);

        let mut sorted = shuffled;
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_shuffle_consumes_one_draw_per_swap() {
        let (_, after) = shuffle(Seed::new(5), vec![1, 2, 3, 4]);
        let (_, expected) = roll_dice(Seed::new(5), 3);
        assert_eq!(after, expected);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let seed = Seed::new(99);

        let (empty, after) = shuffle(seed, Vec::<u8>::new());
        assert!(empty.is_empty());
        assert_eq!(after, seed);

        let (single, after) = shuffle(seed, vec![7]);
        assert_eq!(single, vec![7]);
        assert_eq!(after, seed);
    }

    #[test]
    fn test_seed_masks_to_31_bits() {
        assert_eq!(Seed::new(u32::MAX).value(), SEED_MASK);
        assert_eq!(Seed::new(1 << 31).value(), 0);
    }

    #[test]
    fn test_from_u64_every_bit_matters() {
        let base = 0x0123_4567_89AB_CDEFu64;
        for bit in 0..64 {
            assert_ne!(
                Seed::from_u64(base),
                Seed::from_u64(base ^ (1 << bit)),
                "bit {bit} did not reach the seed"
            );
        }
    }

    #[test]
    fn test_seed_serde() {
        let seed = Seed::new(12_345);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "12345");

        let masked: Seed = serde_json::from_str("4294967295").unwrap();
        assert_eq!(masked.value(), SEED_MASK);
    }
}
