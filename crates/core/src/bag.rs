//! Bag module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: every refill puts one of each kind
//! (I, O, T, S, Z, J, L) into the queue in a uniformly shuffled order, and the
//! queue is only refilled once it is completely empty. Across any window
//! aligned to bag boundaries every kind appears exactly once; a repeat can only
//! straddle a boundary.
//!
//! Shuffling uses `rand`'s Fisher-Yates (`SliceRandom::shuffle`). A seeded bag
//! replays the same sequence within one process.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Current bag, in draw order
    bag: [PieceKind; 7],
    /// Index of the next kind to draw; 7 means the bag is empty
    index: usize,
    rng: StdRng,
}

impl PieceBag {
    /// Create a bag whose sequence is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            index: 7,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a bag seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            bag: PieceKind::ALL,
            index: 7,
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.index = 0;
    }

    /// Draw the next piece kind, refilling with a fresh bag when empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.index];
        self.index += 1;
        kind
    }

    /// Kinds left in the current bag, in draw order.
    pub fn remaining(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag[self.index..].iter().copied()
    }

    /// Drop the current bag; the next draw shuffles a fresh one.
    pub fn reset(&mut self) {
        self.index = self.bag.len();
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::from_entropy()
    }
}
