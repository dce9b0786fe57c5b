//! Move selection strategies.
//!
//! Selectors are trait objects so drivers can swap them without generics:
//! - `WorstMove`: lowest enumeration score, a baseline for level tuning
//! - `RandomMove`: any legal move, uniformly
//! - `BestMove`: highest enumeration score
//! - `SmartMove`: one-ply lookahead on a scratch board
//!
//! Every selector breaks ties uniformly through the caller's RNG, so a
//! session replays exactly from its seed.

use crate::core::{Board, GameRng};
use crate::engine::{Move, PatternLibrary, ScoredMove};

use super::lookahead::{simulate_move, LookaheadWeights};

// =============================================================================
// Selector trait
// =============================================================================

/// Picks one move out of the legal moves on a settled board.
pub trait MoveSelector: Send + Sync {
    /// Short identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Choose a move, or `None` when `moves` is empty.
    fn select(&self, board: &Board, moves: &[ScoredMove], rng: &mut GameRng) -> Option<Move>;
}

/// Uniform pick among the moves whose key equals the extreme one.
fn pick_extreme<K: Ord + Copy>(
    moves: &[ScoredMove],
    keys: &[K],
    highest: bool,
    rng: &mut GameRng,
) -> Option<Move> {
    let target = if highest {
        keys.iter().max()
    } else {
        keys.iter().min()
    }
    .copied()?;
    let tied: Vec<Move> = moves
        .iter()
        .zip(keys)
        .filter(|(_, key)| **key == target)
        .map(|(m, _)| m.mv)
        .collect();
    rng.choose(&tied).copied()
}

// =============================================================================
// Score-based selectors
// =============================================================================

/// The legal move with the lowest heuristic score.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorstMove;

impl MoveSelector for WorstMove {
    fn name(&self) -> &'static str {
        "worst"
    }

    fn select(&self, _board: &Board, moves: &[ScoredMove], rng: &mut GameRng) -> Option<Move> {
        let keys: Vec<u32> = moves.iter().map(|m| m.score).collect();
        pick_extreme(moves, &keys, false, rng)
    }
}

/// Any legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMove;

impl MoveSelector for RandomMove {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&self, _board: &Board, moves: &[ScoredMove], rng: &mut GameRng) -> Option<Move> {
        rng.choose(moves).map(|m| m.mv)
    }
}

/// The legal move with the highest heuristic score.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestMove;

impl MoveSelector for BestMove {
    fn name(&self) -> &'static str {
        "best"
    }

    fn select(&self, _board: &Board, moves: &[ScoredMove], rng: &mut GameRng) -> Option<Move> {
        let keys: Vec<u32> = moves.iter().map(|m| m.score).collect();
        pick_extreme(moves, &keys, true, rng)
    }
}

// =============================================================================
// Lookahead selector
// =============================================================================

/// Plays every candidate on a scratch board and keeps the one whose
/// immediate cascade scores highest under [`LookaheadWeights`].
///
/// Refill is not simulated: what drops in afterwards is unknown to a player.
/// Simulations match with the standard library unless told otherwise; a
/// session hands out one matching its own via `GameSession::smart_move`.
#[derive(Clone, Debug, Default)]
pub struct SmartMove {
    weights: LookaheadWeights,
    library: PatternLibrary,
}

impl SmartMove {
    #[must_use]
    pub fn new(weights: LookaheadWeights) -> Self {
        Self {
            weights,
            library: PatternLibrary::standard(),
        }
    }

    /// Simulate with `library` instead of the standard patterns.
    #[must_use]
    pub fn with_library(mut self, library: PatternLibrary) -> Self {
        self.library = library;
        self
    }

    #[must_use]
    pub fn weights(&self) -> &LookaheadWeights {
        &self.weights
    }

    #[must_use]
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }
}

impl MoveSelector for SmartMove {
    fn name(&self) -> &'static str {
        "smart"
    }

    fn select(&self, board: &Board, moves: &[ScoredMove], rng: &mut GameRng) -> Option<Move> {
        let keys: Vec<u64> = moves
            .iter()
            .map(|m| simulate_move(board, m.mv, rng, &self.library, &self.weights))
            .collect();
        pick_extreme(moves, &keys, true, rng)
    }
}
