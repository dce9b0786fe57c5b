//! Match finding and conflict resolution.
//!
//! ## Conflict resolution
//!
//! All pattern matches are enumerated by origin row, then origin column,
//! then library order. Overlapping matches are then resolved:
//!
//! 1. A match overlapping any strictly larger match is dominated and dropped.
//! 2. A match overlapping only smaller matches (or nothing) is accepted.
//! 3. The remaining matches tie with an overlapping match of the same size.
//!    They are accepted greedily in enumeration order, skipping any that
//!    overlap a match accepted so far.
//!
//! Each accepted match is applied through the shared effect rules with
//! exposure on, then its reward gem (if the shape has one) is placed on one
//! footprint cell.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Board, Cell, CellMask, GameRng, GemColor, Grid, Pos};

use super::effect::apply_mask;
use super::moves::Move;
use super::pattern::PatternLibrary;

/// One pattern occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Index into the pattern library.
    pub pattern: usize,
    pub origin: Pos,
    pub color: GemColor,
    pub cells: SmallVec<[Pos; 5]>,
}

impl Match {
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn overlaps(&self, other: &Match) -> bool {
        self.cells.iter().any(|pos| other.cells.contains(pos))
    }

    #[must_use]
    pub fn covers(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Standing {
    Free,
    Tied,
    Dominated,
}

/// Finds and removes matches, spawning reward gems.
#[derive(Clone, Debug, Default)]
pub struct Combiner {
    library: PatternLibrary,
    last_swap: Option<Move>,
}

impl Combiner {
    /// Combiner over the standard pattern library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_library(library: PatternLibrary) -> Self {
        Self {
            library,
            last_swap: None,
        }
    }

    #[must_use]
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Remember the swap that led to the next combine pass.
    ///
    /// Rewards prefer the swap's destination, then its source.
    pub fn set_last_swap(&mut self, mv: Option<Move>) {
        self.last_swap = mv;
    }

    #[must_use]
    pub fn last_swap(&self) -> Option<Move> {
        self.last_swap
    }

    /// Every pattern occurrence on `grid`, in enumeration order.
    #[must_use]
    pub fn find_matches(&self, grid: &Grid) -> Vec<Match> {
        let mut found = Vec::new();
        for origin in grid.positions() {
            for (index, pattern) in self.library.iter().enumerate() {
                if let Some(color) = pattern.match_at(grid, origin) {
                    found.push(Match {
                        pattern: index,
                        origin,
                        color,
                        cells: pattern.cells_at(origin),
                    });
                }
            }
        }
        found
    }

    /// Indices of the matches that survive conflict resolution, in the
    /// order they are applied.
    #[must_use]
    pub fn resolve(matches: &[Match]) -> Vec<usize> {
        let standing: Vec<Standing> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let mut standing = Standing::Free;
                for (j, other) in matches.iter().enumerate() {
                    if i == j || !m.overlaps(other) {
                        continue;
                    }
                    if other.size() > m.size() {
                        return Standing::Dominated;
                    }
                    if other.size() == m.size() {
                        standing = Standing::Tied;
                    }
                }
                standing
            })
            .collect();

        let mut accepted: Vec<usize> = (0..matches.len())
            .filter(|&i| standing[i] == Standing::Free)
            .collect();
        for i in (0..matches.len()).filter(|&i| standing[i] == Standing::Tied) {
            if accepted.iter().all(|&j| !matches[i].overlaps(&matches[j])) {
                accepted.push(i);
            }
        }
        accepted
    }

    /// One combine pass. Returns whether any match was accepted.
    pub fn step(&mut self, board: &mut Board, rng: &mut GameRng) -> bool {
        let matches = self.find_matches(board.grid());
        let accepted = Self::resolve(&matches);
        if accepted.is_empty() {
            return false;
        }

        for &i in &accepted {
            let found = &matches[i];
            let mask = CellMask::from_positions(board.grid(), found.cells.iter().copied());
            apply_mask(board, &mask, true);

            let reward = self.library.get(found.pattern).and_then(|p| p.reward());
            if let Some(kind) = reward {
                let target = self.reward_cell(found, rng);
                board.grid_mut().set(target, Cell::special(kind, found.color));
            }
        }
        debug!(found = matches.len(), accepted = accepted.len(), "combine pass");
        true
    }

    /// Where a match's reward gem goes.
    ///
    /// Without a recorded swap the first footprint cell is used.
    fn reward_cell(&self, found: &Match, rng: &mut GameRng) -> Pos {
        match self.last_swap {
            None => found.cells[0],
            Some(mv) if found.covers(mv.to) => mv.to,
            Some(mv) if found.covers(mv.from) => mv.from,
            Some(_) => found.cells[rng.below(found.cells.len())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, GemKind, LockState};

    fn board(layout: &str) -> Board {
        Board::from_grid(layout.parse::<Grid>().unwrap())
    }

    fn names(combiner: &Combiner, matches: &[Match], picked: &[usize]) -> Vec<&'static str> {
        picked
            .iter()
            .map(|&i| combiner.library().get(matches[i].pattern).unwrap().name())
            .collect()
    }

    #[test]
    fn test_run_of_four_dominates_threes() {
        let board = board("1 1 1 1 2");
        let combiner = Combiner::new();
        let matches = combiner.find_matches(board.grid());
        assert_eq!(matches.len(), 3);
        let accepted = Combiner::resolve(&matches);
        assert_eq!(names(&combiner, &matches, &accepted), vec!["H4"]);
    }

    #[test]
    fn test_t_shape_beats_runs() {
        let board = board(
            "2 2 2\n\
             3 2 4\n\
             4 2 3",
        );
        let combiner = Combiner::new();
        let matches = combiner.find_matches(board.grid());
        let accepted = Combiner::resolve(&matches);
        assert_eq!(names(&combiner, &matches, &accepted), vec!["TVD"]);
    }

    #[test]
    fn test_tied_matches_first_wins() {
        // Plus shape: no T or L fits, so a V3 and an H3 tie on the center.
        let board = board(
            "3 1 4\n\
             1 1 1\n\
             4 1 3",
        );
        let combiner = Combiner::new();
        let matches = combiner.find_matches(board.grid());
        let accepted = Combiner::resolve(&matches);
        let picked = names(&combiner, &matches, &accepted);
        // The V3 at (0,1) is enumerated before the H3 at (1,0).
        assert_eq!(picked, vec!["V3"]);
    }

    #[test]
    fn test_disjoint_matches_all_accepted() {
        let board = board(
            "1 1 1\n\
             2 3 2\n\
             4 4 4",
        );
        let combiner = Combiner::new();
        let matches = combiner.find_matches(board.grid());
        assert_eq!(Combiner::resolve(&matches).len(), 2);
    }

    #[test]
    fn test_step_clears_and_rewards_at_swap_destination() {
        let mut board = board(
            "1 2 3 4 5 6\n\
             2 3 4 5 6 1\n\
             3 3 3 3 1 2\n\
             4 5 6 1 2 3\n\
             5 6 1 2 3 4",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        combiner.set_last_swap(Some(Move::new(Pos::new(1, 2), Pos::new(2, 2))));

        assert!(combiner.step(&mut board, &mut rng));
        let grid = board.grid();
        assert_eq!(grid[Pos::new(2, 2)], Cell::special(GemKind::StripeRow, GemColor::new(3)));
        for col in [0, 1, 3] {
            assert!(grid[Pos::new(2, col)].is_vacant());
        }
        assert_eq!(board.events().last(), Some(&Event::Destroyed(4)));
        assert!(!combiner.step(&mut board, &mut rng));
    }

    #[test]
    fn test_reward_without_swap_uses_first_cell() {
        let mut board = board("2 2 2 2 2");
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        assert!(combiner.step(&mut board, &mut rng));
        assert_eq!(board.grid()[Pos::new(0, 0)], Cell::zapper());
        assert_eq!(board.grid().count(|cell| cell.kind == GemKind::Empty), 4);
    }

    #[test]
    fn test_reward_falls_back_to_swap_source() {
        let mut board = board(
            "1 1 1 1\n\
             2 3 2 3",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        combiner.set_last_swap(Some(Move::new(Pos::new(0, 2), Pos::new(1, 2))));

        assert!(combiner.step(&mut board, &mut rng));
        let grid = board.grid();
        assert_eq!(grid[Pos::new(0, 2)], Cell::special(GemKind::StripeRow, GemColor::new(1)));
        for col in [0, 1, 3] {
            assert!(grid[Pos::new(0, col)].is_vacant());
        }
    }

    #[test]
    fn test_reward_lands_on_random_cell_away_from_swap() {
        let layout = "1 1 1 1\n\
                      2 3 2 3\n\
                      4 5 4 5";
        let mut board = board(layout);
        let mut rng = GameRng::new(9);
        let mut combiner = Combiner::new();
        combiner.set_last_swap(Some(Move::new(Pos::new(2, 0), Pos::new(2, 1))));

        assert!(combiner.step(&mut board, &mut rng));
        let expected = Pos::new(0, GameRng::new(9).below(4));
        let grid = board.grid();
        for col in 0..4 {
            let pos = Pos::new(0, col);
            if pos == expected {
                assert_eq!(grid[pos], Cell::special(GemKind::StripeRow, GemColor::new(1)));
            } else {
                assert!(grid[pos].is_vacant());
            }
        }
        assert_eq!(grid.count(|cell| cell.kind == GemKind::StripeRow), 1);
    }

    #[test]
    fn test_vertical_run_rewards_column_stripe() {
        let mut board = board(
            "1 2\n\
             1 3\n\
             1 2\n\
             1 3",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        assert!(combiner.step(&mut board, &mut rng));

        let grid = board.grid();
        assert_eq!(grid[Pos::new(0, 0)], Cell::special(GemKind::StripeCol, GemColor::new(1)));
        for row in 1..4 {
            assert!(grid[Pos::new(row, 0)].is_vacant());
        }
        assert_eq!(board.events().last(), Some(&Event::Destroyed(4)));
    }

    #[test]
    fn test_t_shape_rewards_bomb_at_swap_destination() {
        let mut board = board(
            "2 2 2\n\
             3 2 4\n\
             4 2 3",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        combiner.set_last_swap(Some(Move::new(Pos::new(1, 2), Pos::new(1, 1))));

        assert!(combiner.step(&mut board, &mut rng));
        let grid = board.grid();
        assert_eq!(grid[Pos::new(1, 1)], Cell::special(GemKind::Bomb, GemColor::new(2)));
        for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2), Pos::new(2, 1)] {
            assert!(grid[pos].is_vacant());
        }
        assert_eq!(grid[Pos::new(1, 2)], Cell::simple(4));
        assert_eq!(board.events().last(), Some(&Event::Destroyed(5)));
    }

    #[test]
    fn test_zapper_run_is_armed() {
        let mut board = board(
            "Z Z Z\n\
             1 2 3",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        assert!(combiner.step(&mut board, &mut rng));

        for col in 0..3 {
            let cell = board.grid()[Pos::new(0, col)];
            assert_eq!(cell.kind, GemKind::Zapper);
            assert_eq!(cell.lock, LockState::Exploding);
        }
        assert!(board.events().is_empty());
        assert!(!combiner.step(&mut board, &mut rng));
    }

    #[test]
    fn test_colorless_run_reward_stays_colorless() {
        let mut board = board(
            "Z Z Z Z\n\
             1 2 3 4",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        assert!(combiner.step(&mut board, &mut rng));

        let grid = board.grid();
        assert_eq!(grid[Pos::new(0, 0)], Cell::special(GemKind::StripeRow, GemColor::NONE));
        for col in 1..4 {
            assert_eq!(grid[Pos::new(0, col)].lock, LockState::Exploding);
        }
    }

    #[test]
    fn test_match_arms_caught_specials_and_exposes() {
        let mut board = board(
            "1 =1 1\n\
             2L 3l 4",
        );
        let mut rng = GameRng::new(1);
        let mut combiner = Combiner::new();
        assert!(combiner.step(&mut board, &mut rng));

        let grid = board.grid();
        assert_eq!(grid[Pos::new(0, 1)].lock, LockState::Exploding);
        assert_eq!(grid[Pos::new(1, 0)].lock, LockState::Locked);
        assert_eq!(grid[Pos::new(1, 1)].lock, LockState::Normal);
        let events: Vec<Event> = board.events().iter().copied().collect();
        assert_eq!(events, vec![Event::Unlocked(2), Event::Destroyed(2)]);
    }
}
