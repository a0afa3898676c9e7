//! Seeded food placement.
//!
//! Every engine owns its own [`FoodSelector`], so instances never share a
//! random stream and the same seed always replays the same placements.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::board::Cell;
use super::free_cells::FreeCells;

/// Food position used when the snake covers the whole board
pub const FOOD_SENTINEL: Cell = Cell::new(0, 0);

/// Uniform free-cell picker driven by a per-instance ChaCha8 stream
#[derive(Debug, Clone)]
pub struct FoodSelector {
    rng: ChaCha8Rng,
    seed: u64,
}

impl FoodSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restart the stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Seed the current stream was started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick one free cell, each with probability 1/k.
    ///
    /// Returns `None` when no cell is free.
    pub fn select(&mut self, free: &FreeCells) -> Option<Cell> {
        if free.is_empty() {
            return None;
        }
        let position = self.rng.gen_range(0..free.len());
        free.get(position)
    }
}
