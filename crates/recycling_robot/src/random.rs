//! Injectable sources of uniform random draws.
//!
//! The agent and the environment each own one source. Production code uses
//! [`SeededRng`]; tests that need exact draws use [`ScriptedDraws`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws.
pub trait RandomSource {
    /// Returns a uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// A seedable pseudo-random generator backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Creates a deterministic generator from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }
}

/// Replays a fixed sequence of unit draws, cycling when exhausted.
///
/// `next_index` maps the next unit draw onto `0..len` by scaling, so a draw of
/// `0.0` always picks the first legal action.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    /// Creates a script from the given draws. An empty script always yields `0.0`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// A script that yields the same draw forever.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }

    fn next_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SeededRng::from_seed(7);
        let mut b = SeededRng::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn test_seeded_rng_ranges() {
        let mut rng = SeededRng::from_seed(42);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
            assert!(rng.next_index(3) < 3);
        }
    }

    #[test]
    fn test_scripted_draws_cycle() {
        let mut script = ScriptedDraws::new(vec![0.1, 0.9]);
        assert_eq!(script.next_unit(), 0.1);
        assert_eq!(script.next_unit(), 0.9);
        assert_eq!(script.next_unit(), 0.1);
        assert_eq!(script.consumed(), 3);
    }

    #[test]
    fn test_scripted_index_scaling() {
        let mut script = ScriptedDraws::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(script.next_index(3), 0);
        assert_eq!(script.next_index(3), 1);
        assert_eq!(script.next_index(3), 2);
    }

    #[test]
    fn test_empty_script_yields_zero() {
        let mut script = ScriptedDraws::new(Vec::new());
        assert_eq!(script.next_unit(), 0.0);
        assert_eq!(script.next_index(2), 0);
    }
}
