//! Randomness seam for combat and AI rolls
//!
//! Every `rand` generator is a `Dice`. Tests that need exact numbers use
//! `FixedDice` instead.

use rand::{Rng, RngCore};

pub trait Dice {
    /// Uniform roll in `[0, 1)`
    fn roll_unit(&mut self) -> f64;

    /// Uniform roll in `[low, high]`
    fn roll_range(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> Dice for R {
    fn roll_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn roll_range(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Deterministic dice
///
/// `roll_unit` always returns `unit`, `roll_range` lands at `range_fraction`
/// of the way from `low` to `high`, and `pick_index` returns `index`
/// wrapped to the requested length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDice {
    pub unit: f64,
    pub range_fraction: f64,
    pub index: usize,
}

impl FixedDice {
    /// Never dodges; jitter rolls land on the midpoint (1.0 for `[0.8, 1.2]`)
    pub fn never_dodge() -> Self {
        Self {
            unit: 1.0,
            range_fraction: 0.5,
            index: 0,
        }
    }

    /// Every dodge roll succeeds for any agility above zero
    pub fn always_dodge() -> Self {
        Self {
            unit: 0.0,
            range_fraction: 0.5,
            index: 0,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl Default for FixedDice {
    fn default() -> Self {
        Self::never_dodge()
    }
}

impl Dice for FixedDice {
    fn roll_unit(&mut self) -> f64 {
        self.unit
    }

    fn roll_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.range_fraction
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.index % len.max(1)
    }
}

/// Pick `count` distinct items from `items` by partial Fisher-Yates shuffle
pub fn pick_distinct<T: Copy, D: Dice + ?Sized>(items: &[T], count: usize, dice: &mut D) -> Vec<T> {
    let mut pool = items.to_vec();
    let count = count.min(pool.len());
    for i in 0..count {
        let j = i + dice.pick_index(pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}
