//! One-ply lookahead on a scratch board.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Event, GameRng};
use crate::engine::{Activator, Combiner, Move, PatternLibrary, SwapResolver};

/// Points per event kind when judging a simulated move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookaheadWeights {
    /// Per destroyed gem.
    pub destroyed: u32,
    /// Per lock level removed.
    pub unlocked: u32,
    /// Per special gem set off.
    pub activated: u32,
    /// Per special pair combined.
    pub combined: u32,
}

impl Default for LookaheadWeights {
    fn default() -> Self {
        Self {
            destroyed: 1,
            unlocked: 3,
            activated: 10,
            combined: 20,
        }
    }
}

impl LookaheadWeights {
    #[must_use]
    pub fn with_destroyed(mut self, points: u32) -> Self {
        self.destroyed = points;
        self
    }

    #[must_use]
    pub fn with_unlocked(mut self, points: u32) -> Self {
        self.unlocked = points;
        self
    }

    #[must_use]
    pub fn with_activated(mut self, points: u32) -> Self {
        self.activated = points;
        self
    }

    #[must_use]
    pub fn with_combined(mut self, points: u32) -> Self {
        self.combined = points;
        self
    }

    /// Weighted sum over `events`.
    pub fn score<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> u64 {
        events
            .into_iter()
            .map(|event| match *event {
                Event::Destroyed(n) => u64::from(self.destroyed) * u64::from(n),
                Event::Unlocked(n) => u64::from(self.unlocked) * u64::from(n),
                Event::Activated(_) => u64::from(self.activated),
                Event::Combined(_) => u64::from(self.combined),
            })
            .sum()
    }
}

/// Play `mv` on a copy of `board` and score what happens before any refill.
///
/// The swap, then combine and activation passes until both are quiet, run
/// on a scratch board with a fork of `rng`, so neither the live board nor
/// the live random stream is touched beyond the fork counter. Matches are
/// found with `library`, which should be the one the game plays with.
pub fn simulate_move(
    board: &Board,
    mv: Move,
    rng: &mut GameRng,
    library: &PatternLibrary,
    weights: &LookaheadWeights,
) -> u64 {
    let mut scratch = board.clone();
    let mut sim_rng = rng.fork();
    let seen = scratch.events().len();

    SwapResolver::default().run(&mut scratch, mv, &mut sim_rng);
    let mut combiner = Combiner::with_library(library.clone());
    combiner.set_last_swap(Some(mv));
    let activator = Activator::new();
    loop {
        let combined = combiner.step(&mut scratch, &mut sim_rng);
        let activated = activator.step(&mut scratch, &mut sim_rng);
        if !combined && !activated {
            break;
        }
    }

    weights.score(scratch.events().since(seen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Combo, GemKind, Grid, Pos};
    use crate::engine::Pattern;

    #[test]
    fn test_weighted_sum() {
        let weights = LookaheadWeights::default();
        let events = [
            Event::Destroyed(4),
            Event::Unlocked(2),
            Event::Activated(GemKind::Bomb),
            Event::Combined(Combo::BombBomb),
        ];
        assert_eq!(weights.score(&events), 4 + 6 + 10 + 20);
        assert_eq!(weights.with_combined(0).score(&events), 20);
    }

    #[test]
    fn test_simulation_leaves_board_untouched() {
        let grid: Grid = "1 2 1 1\n\
                          3 4 3 4\n\
                          4 3 4 3"
            .parse()
            .unwrap();
        let board = Board::from_grid(grid);
        let snapshot = board.clone();
        let mut rng = GameRng::new(3);

        let score = simulate_move(
            &board,
            Move::new(Pos::new(0, 0), Pos::new(0, 1)),
            &mut rng,
            &PatternLibrary::standard(),
            &LookaheadWeights::default(),
        );
        assert_eq!(score, 3);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_simulation_uses_given_library() {
        let grid: Grid = "1 2 1 1\n\
                          3 4 3 4\n\
                          4 3 4 3"
            .parse()
            .unwrap();
        let board = Board::from_grid(grid);
        let mv = Move::new(Pos::new(0, 0), Pos::new(0, 1));
        let weights = LookaheadWeights::default();
        let verticals_only =
            PatternLibrary::new(vec![Pattern::from_art("V3", &["X", "X", "X"], None)]);

        let mut rng = GameRng::new(3);
        assert_eq!(simulate_move(&board, mv, &mut rng, &verticals_only, &weights), 0);
        assert_eq!(
            simulate_move(&board, mv, &mut rng, &PatternLibrary::standard(), &weights),
            3
        );
    }
}
