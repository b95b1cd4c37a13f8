//! Injected randomness.
//!
//! Every decision that needs chance takes a `&mut dyn RandomSource`, so a turn
//! is fully reproducible from the sequence of values the source hands out.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// A uniform integer in `[0, bound)`. A `bound` of 0 yields 0.
    fn draw(&mut self, bound: u32, reason: &str) -> u32;
}

/// Percentage roll. Chances of 100 or more succeed without consuming a draw.
pub fn roll_percent(rng: &mut dyn RandomSource, chance: u8, reason: &str) -> bool {
    if chance >= 100 {
        return true;
    }
    rng.draw(100, reason) < chance as u32
}

/// A scripted source for tests: hands out the given values in order.
///
/// Values at or above the requested bound are clamped to `bound - 1`.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u32>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// How many values have been handed out so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for TurnRng {
    fn draw(&mut self, bound: u32, reason: &str) -> u32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index].min(bound.saturating_sub(1));
        self.index += 1;
        trace!("[RNG] Consumed {} (bound {}) for: {}", outcome, bound, reason);
        outcome
    }
}

/// Reproducible pseudo-random source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn draw(&mut self, bound: u32, reason: &str) -> u32 {
        if bound == 0 {
            return 0;
        }
        let outcome = self.rng.random_range(0..bound);
        trace!("[RNG] Drew {} (bound {}) for: {}", outcome, bound, reason);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_rng_replays_and_clamps() {
        let mut rng = TurnRng::new_for_test(vec![3, 250, 0]);
        assert_eq!(rng.draw(10, "first"), 3);
        assert_eq!(rng.draw(100, "clamped"), 99);
        assert_eq!(rng.draw(2, "last"), 0);
        assert_eq!(rng.consumed(), 3);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted! Tried to get a value for: 'accuracy'")]
    fn test_turn_rng_panics_with_reason_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.draw(100, "accuracy");
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_in_range() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..200 {
            let x = a.draw(7, "test");
            assert!(x < 7);
            assert_eq!(x, b.draw(7, "test"));
        }
        assert_eq!(a.draw(0, "empty"), 0);
    }

    #[test]
    fn test_roll_percent_skips_draw_for_certain_chance() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(roll_percent(&mut rng, 100, "certain"));

        let mut rng = TurnRng::new_for_test(vec![29, 30]);
        assert!(roll_percent(&mut rng, 30, "hit"));
        assert!(!roll_percent(&mut rng, 30, "miss"));
    }
}
