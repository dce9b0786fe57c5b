//! Shared effect application.
//!
//! Matches, activations and pair combinations all end up here: they describe
//! the cells they hit as a [`CellMask`] and [`apply_mask`] applies the same
//! rules to every marked cell:
//!
//! | cell | result |
//! |------|--------|
//! | out of play | untouched |
//! | locked / double-locked | loses one lock level (`unlocked`) |
//! | unlocked simple gem | cleared (`destroyed`) |
//! | unlocked special gem | armed as `Exploding` for the next activation pass |
//! | empty or already exploding | untouched |
//!
//! With exposure on, every orthogonal neighbor of the footprint that is not
//! itself in the footprint also loses one lock level, once, however many
//! footprint cells it touches.

use rustc_hash::FxHashSet;

use crate::core::{Board, CellMask, Event, GemKind, LockState, Pos};

/// Counts from one application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectTally {
    pub destroyed: u32,
    pub unlocked: u32,
    pub armed: u32,
}

impl EffectTally {
    /// Whether any cell changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.destroyed + self.unlocked + self.armed > 0
    }
}

/// Apply lock/destroy/arm rules to every cell of `mask`.
///
/// Emits `Unlocked` then `Destroyed`, each only when non-zero.
pub fn apply_mask(board: &mut Board, mask: &CellMask, expose: bool) -> EffectTally {
    let mut tally = EffectTally::default();
    let grid = board.grid_mut();

    for pos in mask.iter() {
        let cell = grid[pos];
        if cell.is_out_of_play() {
            continue;
        }
        if cell.lock.is_locked() {
            grid.set_lock(pos, cell.lock.loosened());
            tally.unlocked += 1;
        } else if cell.lock.is_normal() {
            match cell.kind {
                GemKind::Simple => {
                    grid.clear(pos);
                    tally.destroyed += 1;
                }
                kind if kind.is_special() => {
                    grid.set_lock(pos, LockState::Exploding);
                    tally.armed += 1;
                }
                _ => {}
            }
        }
    }

    if expose {
        let rim: FxHashSet<Pos> = mask
            .iter()
            .flat_map(|pos| grid.neighbors(pos).collect::<Vec<_>>())
            .filter(|&pos| !mask.contains(pos))
            .collect();
        let mut rim: Vec<Pos> = rim.into_iter().collect();
        rim.sort_unstable();
        for pos in rim {
            let cell = grid[pos];
            if cell.lock.is_locked() && !cell.is_out_of_play() {
                grid.set_lock(pos, cell.lock.loosened());
                tally.unlocked += 1;
            }
        }
    }

    if tally.unlocked > 0 {
        board.record(Event::Unlocked(tally.unlocked));
    }
    if tally.destroyed > 0 {
        board.record(Event::Destroyed(tally.destroyed));
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Grid};

    fn board(layout: &str) -> Board {
        Board::from_grid(layout.parse::<Grid>().unwrap())
    }

    #[test]
    fn test_destroy_unlock_and_arm() {
        let mut board = board(
            "1 2l 3L\n\
             *4 # .",
        );
        let mut mask = CellMask::for_grid(board.grid());
        for pos in board.grid().positions() {
            mask.insert(pos);
        }
        let tally = apply_mask(&mut board, &mask, false);

        assert_eq!(tally, EffectTally { destroyed: 1, unlocked: 2, armed: 1 });
        let expected: Grid = ".  2  3l\n*4! #  .".parse().unwrap();
        assert_eq!(board.grid(), &expected);
        let events: Vec<Event> = board.events().iter().copied().collect();
        assert_eq!(events, vec![Event::Unlocked(2), Event::Destroyed(1)]);
    }

    #[test]
    fn test_exposure_hits_rim_once() {
        let mut board = board(
            "1L 1 1L\n\
             1 1L 1",
        );
        let mask = CellMask::from_positions(board.grid(), [Pos::new(0, 1)]);
        let tally = apply_mask(&mut board, &mask, true);

        assert_eq!(tally.destroyed, 1);
        assert_eq!(tally.unlocked, 3);
        assert_eq!(board.grid()[Pos::new(0, 0)].lock, LockState::Locked);
        assert_eq!(board.grid()[Pos::new(0, 2)].lock, LockState::Locked);
        assert_eq!(board.grid()[Pos::new(1, 1)].lock, LockState::Locked);
        assert_eq!(board.grid()[Pos::new(1, 0)], Cell::simple(1));
    }

    #[test]
    fn test_shared_rim_cell_loosens_once() {
        let mut board = board("1 1L 1");
        let mask = CellMask::from_positions(board.grid(), [Pos::new(0, 0), Pos::new(0, 2)]);
        apply_mask(&mut board, &mask, true);
        assert_eq!(board.grid()[Pos::new(0, 1)].lock, LockState::Locked);
    }

    #[test]
    fn test_no_events_without_change() {
        let mut board = board(". # Z!");
        let mut mask = CellMask::for_grid(board.grid());
        mask.fill_row(0);
        let tally = apply_mask(&mut board, &mask, true);
        assert!(!tally.changed());
        assert!(board.events().is_empty());
    }
}
