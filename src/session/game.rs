//! Reference game driver.
//!
//! `GameSession` owns a board, its refill, the engine components and the
//! game's random stream, and runs the loop an automated player sees:
//!
//! 1. **Settle**: drop and refill until quiet, then one combine and
//!    activation round; repeat while that round changed anything.
//! 2. **Enumerate**: list legal moves, shuffling when there are none.
//! 3. **Play**: swap, remember the swap for reward placement, then one
//!    combine and activation round.
//!
//! Two guards end a game early with [`UnplayableBoard`]: too many shuffles
//! over the game, and too many settle rounds per swap.

use tracing::{debug, info, warn};

use crate::core::{Board, EngineResult, GameRng, UnplayableBoard};
use crate::engine::{Activator, Combiner, GravityResolver, Move, ScoredMove, SwapOutcome, SwapResolver};
use crate::fill::TopFiller;
use crate::strategy::{LookaheadWeights, MoveSelector, ScoreCard, SmartMove};

use super::config::SessionConfig;

/// One automated game on one board.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    rng: GameRng,
    config: SessionConfig,
    top: TopFiller,
    gravity: GravityResolver,
    combiner: Combiner,
    activator: Activator,
    swapper: SwapResolver,
    swaps: u32,
    combinations: u32,
    shuffles: u32,
}

impl GameSession {
    /// Start a session on a prepared board (zones placed, specials seeded).
    pub fn new(board: Board, top: TopFiller, config: SessionConfig, rng: GameRng) -> Self {
        let swapper = SwapResolver::new(config.move_weights.clone());
        Self {
            board,
            rng,
            config,
            top,
            gravity: GravityResolver::new(),
            combiner: Combiner::new(),
            activator: Activator::new(),
            swapper,
            swaps: 0,
            combinations: 0,
            shuffles: 0,
        }
    }

    /// Replace the match finder, e.g. to play with a custom pattern library.
    #[must_use]
    pub fn with_combiner(mut self, combiner: Combiner) -> Self {
        self.combiner = combiner;
        self
    }

    /// Lookahead selector that matches with this session's pattern library.
    #[must_use]
    pub fn smart_move(&self, weights: LookaheadWeights) -> SmartMove {
        SmartMove::new(weights).with_library(self.combiner.library().clone())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Settle rounds that changed the board.
    #[must_use]
    pub fn combinations(&self) -> u32 {
        self.combinations
    }

    #[must_use]
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Whether the swap budget is spent.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.swaps >= self.config.max_swaps
    }

    /// Statistics over every event so far.
    #[must_use]
    pub fn score(&self) -> ScoreCard {
        ScoreCard::from_events(self.board.events().iter())
    }

    /// Alternate gravity and refill until neither changes anything.
    ///
    /// Returns the number of cell changes.
    pub fn settle_drop(&mut self) -> usize {
        let mut total = 0;
        loop {
            let dropped = self.gravity.step(&mut self.board, &mut self.rng);
            let filled = self.top.step(&mut self.board, &mut self.rng);
            if dropped.is_empty() && filled.is_empty() {
                return total;
            }
            total += dropped.len() + filled.len();
        }
    }

    /// One combine pass followed by one activation pass.
    pub fn combine_round(&mut self) -> bool {
        let combined = self.combiner.step(&mut self.board, &mut self.rng);
        let activated = self.activator.step(&mut self.board, &mut self.rng);
        combined || activated
    }

    /// Run drop and combine rounds until the board is quiet.
    ///
    /// Fails when the board keeps reacting far beyond what the swaps so far
    /// can account for.
    pub fn settle(&mut self) -> Result<(), UnplayableBoard> {
        loop {
            self.settle_drop();
            if !self.combine_round() {
                return Ok(());
            }
            self.combinations += 1;
            if self.combinations > self.config.combination_budget(self.swaps) {
                warn!(
                    combinations = self.combinations,
                    swaps = self.swaps,
                    "board keeps clearing itself"
                );
                return Err(UnplayableBoard::Degenerate {
                    combinations: self.combinations,
                    swaps: self.swaps,
                });
            }
        }
    }

    /// Legal moves on the settled board, shuffling while there are none.
    pub fn legal_moves(&mut self) -> Result<Vec<ScoredMove>, UnplayableBoard> {
        loop {
            let moves = self.swapper.valid_moves(self.board.grid());
            if !moves.is_empty() {
                return Ok(moves);
            }
            self.shuffles += 1;
            if self.shuffles > self.config.max_shuffles {
                warn!(shuffles = self.shuffles, "no legal move left");
                return Err(UnplayableBoard::TooManyShuffles {
                    shuffles: self.shuffles,
                });
            }
            let changed = self.swapper.shuffle(&mut self.board, &mut self.rng);
            info!(shuffles = self.shuffles, changed, "shuffled board");
            self.settle()?;
        }
    }

    /// Apply a move on a settled board, then one combine round.
    ///
    /// # Panics
    ///
    /// If `mv` is not a swap of two adjacent unlocked gems.
    pub fn play(&mut self, mv: Move) -> SwapOutcome {
        let outcome = self.swapper.run(&mut self.board, mv, &mut self.rng);
        self.swaps += 1;
        self.combiner.set_last_swap(Some(mv));
        let changed = self.combine_round();
        info!(swap = self.swaps, %mv, ?outcome, changed, "played");
        outcome
    }

    /// Play until the swap budget is spent, choosing moves with `selector`.
    pub fn run(&mut self, selector: &dyn MoveSelector) -> EngineResult<ScoreCard> {
        loop {
            self.settle()?;
            if self.is_over() {
                break;
            }
            let moves = self.legal_moves()?;
            let Some(mv) = selector.select(&self.board, &moves, &mut self.rng) else {
                break;
            };
            self.play(mv);
        }
        let card = self.score();
        debug!(selector = selector.name(), score = card.score, "game finished");
        Ok(card)
    }
}
