//! Implements RandomSource.
//!
//! | Adapter | Use |
//! |---------|-----|
//! | `ThreadRandomSource` | interactive draws |
//! | `SeededRandomSource` | reproducible draws (`GOLD_DAY_SHUFFLE_SEED`) |
//! | `ScriptedRandomSource` | tests and demos; replays fixed picks |

use crate::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Thread-local RNG from the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn random_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper.max(1))
    }
}

/// Deterministic RNG: the same seed yields the same sequence of draws.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn random_index(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..upper.max(1))
    }
}

/// Replays `picks` in a cycle, each reduced modulo the requested bound. Empty picks yield 0.
#[derive(Debug)]
pub struct ScriptedRandomSource {
    picks: Vec<usize>,
    cursor: Mutex<usize>,
}

impl ScriptedRandomSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for ScriptedRandomSource {
    fn random_index(&self, upper: usize) -> usize {
        if self.picks.is_empty() || upper == 0 {
            return 0;
        }
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let pick = self.picks[*cursor % self.picks.len()];
        *cursor += 1;
        pick % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_in_bounds() {
        let thread = ThreadRandomSource;
        let seeded = SeededRandomSource::new(7);
        for upper in 1..50 {
            assert!(thread.random_index(upper) < upper);
            assert!(seeded.random_index(upper) < upper);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);
        let xs: Vec<usize> = (1..20).map(|n| a.random_index(n)).collect();
        let ys: Vec<usize> = (1..20).map(|n| b.random_index(n)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_cycles_and_wraps() {
        let rng = ScriptedRandomSource::new(vec![1, 5]);
        assert_eq!(rng.random_index(3), 1);
        assert_eq!(rng.random_index(3), 2);
        assert_eq!(rng.random_index(3), 1);
    }
}
