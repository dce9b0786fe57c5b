//! Deterministic random number generation.
//!
//! Every random draw the engine makes (refill colors, reward cells, blast
//! order, zapper targets, diagonal slide sides) goes through a single
//! explicitly passed `GameRng`. The same seed and the same sequence of calls
//! reproduce a game exactly.
//!
//! ## Lookahead
//!
//! Strategies that simulate a move on a scratch board fork the generator so
//! the simulation never advances the live game's stream:
//!
//! ```
//! use rust_match3::core::GameRng;
//!
//! let mut live = GameRng::new(42);
//! let mut twin = GameRng::new(42);
//!
//! let mut scratch = live.fork();
//! scratch.shuffle(&mut [1, 2, 3, 4]);
//!
//! // The live stream is where it was before the fork.
//! assert_eq!(live.gem_color(6), twin.gem_color(6));
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::cell::GemColor;

/// Golden-ratio step between fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 generator with forking and checkpoints.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Seed this generator was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent generator for a scratch simulation.
    ///
    /// Only the fork count advances here, so the n-th fork of a given seed
    /// is always the same stream and the parent's draws are unaffected.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// If `len` is zero.
    pub fn below(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot draw an index from an empty range");
        self.inner.gen_range(0..len)
    }

    /// `true` with probability `p`, which must lie in `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p)
    }

    /// Fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen()
    }

    /// Uniform palette color in `1..=colors`.
    ///
    /// # Panics
    ///
    /// If `colors` is zero.
    pub fn gem_color(&mut self, colors: u8) -> GemColor {
        assert!(colors > 0, "palette must have at least one color");
        GemColor::new(self.inner.gen_range(1..=colors))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform element, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Index drawn proportionally to `weights`.
    ///
    /// `None` when the weights are empty, all zero, or contain a negative
    /// or non-finite value.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.inner))
    }

    /// Checkpoint of the current stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume exactly where `state` was taken.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng.forks = state.forks;
        rng
    }
}

/// Serializable generator checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    pub forks: u64,
}
