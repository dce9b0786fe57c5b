//! Special gem activation.
//!
//! An activation pass takes every cell armed as `Exploding`, in a random
//! order, and sets it off:
//!
//! | kind | hits |
//! |------|------|
//! | zapper | every occupied cell of one random color on the board |
//! | bomb | the 3x3 square around it |
//! | row stripe | its whole row |
//! | column stripe | its whole column |
//! | simple | nothing but itself |
//!
//! The trigger cell is cleared and an `Activated` event recorded, then the
//! footprint goes through the shared effect rules. Simple gems, bombs and
//! zappers also loosen locks around their footprint. Specials caught in a
//! footprint are armed for the next pass, so one call advances a chain
//! reaction by exactly one generation.

use tracing::debug;

use crate::core::{Board, CellMask, Event, GameRng, GemColor, GemKind, Grid, LockState, Pos};

use super::effect::apply_mask;

/// Sets off armed special gems.
#[derive(Clone, Copy, Debug, Default)]
pub struct Activator;

impl Activator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Process every cell armed at the start of the call.
    ///
    /// Returns whether anything was processed.
    pub fn step(&self, board: &mut Board, rng: &mut GameRng) -> bool {
        let mut armed: Vec<Pos> = board
            .grid()
            .iter()
            .filter(|(_, cell)| cell.lock.is_exploding())
            .map(|(pos, _)| pos)
            .collect();
        if armed.is_empty() {
            return false;
        }
        rng.shuffle(&mut armed);

        let mut triggered = 0;
        for pos in armed {
            let cell = board.grid()[pos];
            if !cell.lock.is_exploding() {
                continue;
            }
            if !cell.kind.is_occupied() {
                // Nothing left to set off.
                board.grid_mut().set_lock(pos, LockState::Normal);
                continue;
            }

            let mask = footprint(board.grid(), pos, cell.kind, rng);
            board.grid_mut().clear(pos);
            board.record(Event::Activated(cell.kind));
            apply_mask(board, &mask, cell.kind.exposes_neighbors());
            triggered += 1;
        }
        debug!(triggered, "activation pass");
        true
    }
}

/// Cells hit by a gem of `kind` going off at `pos`.
fn footprint(grid: &Grid, pos: Pos, kind: GemKind, rng: &mut GameRng) -> CellMask {
    let mut mask = CellMask::for_grid(grid);
    match kind {
        GemKind::Zapper => {
            if let Some(color) = pick_board_color(grid, rng) {
                for (target, cell) in grid.iter() {
                    if cell.kind.is_occupied() && cell.color == color {
                        mask.insert(target);
                    }
                }
            }
        }
        GemKind::Bomb => mask.fill_square(pos, 1),
        GemKind::StripeRow => mask.fill_row(pos.row),
        GemKind::StripeCol => mask.fill_col(pos.col),
        GemKind::Simple => {
            mask.insert(pos);
        }
        GemKind::Empty | GemKind::OutOfPlay => unreachable!("{kind:?} cannot be activated"),
    }
    mask
}

/// Uniform choice among the colors of occupied cells, if any.
fn pick_board_color(grid: &Grid, rng: &mut GameRng) -> Option<GemColor> {
    let mut colors: Vec<GemColor> = grid
        .iter()
        .map(|(_, cell)| cell)
        .filter(|cell| cell.kind.is_occupied() && !cell.color.is_colorless())
        .map(|cell| cell.color)
        .collect();
    colors.sort_unstable();
    colors.dedup();
    rng.choose(&colors).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    fn board(layout: &str) -> Board {
        Board::from_grid(layout.parse::<Grid>().unwrap())
    }

    #[test]
    fn test_idle_without_armed_cells() {
        let mut board = board("1 2\n*3 Z");
        let mut rng = GameRng::new(1);
        assert!(!Activator::new().step(&mut board, &mut rng));
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_row_stripe_clears_row_and_arms_specials() {
        let mut board = board(
            "1 2 3 4\n\
             2 =1! 3l *4\n\
             3 4 1 2",
        );
        let mut rng = GameRng::new(1);
        assert!(Activator::new().step(&mut board, &mut rng));

        let grid = board.grid();
        assert!(grid[Pos::new(1, 0)].is_vacant());
        assert!(grid[Pos::new(1, 1)].is_vacant());
        assert_eq!(grid[Pos::new(1, 2)], Cell::simple(3));
        assert_eq!(grid[Pos::new(1, 3)].lock, LockState::Exploding);
        // Stripes do not expose their surroundings.
        assert_eq!(grid[Pos::new(0, 0)], Cell::simple(1));

        let events: Vec<Event> = board.events().iter().copied().collect();
        assert_eq!(
            events,
            vec![Event::Activated(GemKind::StripeRow), Event::Unlocked(1), Event::Destroyed(1)]
        );
    }

    #[test]
    fn test_chain_advances_one_generation_per_step() {
        let mut board = board(
            "1 2 3\n\
             *1! |2 3\n\
             2 3 1",
        );
        let mut rng = GameRng::new(5);
        let activator = Activator::new();

        assert!(activator.step(&mut board, &mut rng));
        assert_eq!(board.grid()[Pos::new(1, 1)].lock, LockState::Exploding);
        assert!(activator.step(&mut board, &mut rng));
        assert!(!activator.step(&mut board, &mut rng));

        let activated: Vec<Event> = board
            .events()
            .iter()
            .filter(|e| matches!(e, Event::Activated(_)))
            .copied()
            .collect();
        assert_eq!(
            activated,
            vec![Event::Activated(GemKind::Bomb), Event::Activated(GemKind::StripeCol)]
        );
        assert!(board.grid().iter().all(|(_, cell)| !cell.lock.is_exploding()));
    }

    #[test]
    fn test_zapper_hits_one_color() {
        let mut board = board(
            "1 2 1\n\
             2 Z! 2\n\
             1 2 1",
        );
        let mut rng = GameRng::new(11);
        assert!(Activator::new().step(&mut board, &mut rng));

        let grid = board.grid();
        let left: Vec<Cell> = grid.iter().map(|(_, c)| c).filter(|c| c.kind.is_occupied()).collect();
        assert_eq!(left.len(), 4);
        let color = left[0].color;
        assert!(left.iter().all(|c| c.color == color));
        assert_eq!(board.events().iter().next(), Some(&Event::Activated(GemKind::Zapper)));
        assert_eq!(board.events().last(), Some(&Event::Destroyed(4)));
    }

    #[test]
    fn test_armed_empty_cell_is_reset() {
        let mut board = board(". .!\n1 2");
        let mut rng = GameRng::new(1);
        assert!(Activator::new().step(&mut board, &mut rng));
        assert_eq!(board.grid()[Pos::new(0, 1)], Cell::EMPTY);
        assert!(board.events().is_empty());
    }
}
