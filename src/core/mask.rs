//! Boolean footprints over a grid.
//!
//! Effects (matches, explosions, pair combinations) first describe *which*
//! cells they touch as a `CellMask`, then a single routine applies the
//! lock/destroy/arm rules to the mask. Masks are sets: marking a cell twice
//! has no extra effect.

use super::grid::{Grid, Pos};

/// Set of positions on a `rows x cols` grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMask {
    rows: usize,
    cols: usize,
    bits: Vec<bool>,
}

impl CellMask {
    /// Empty mask with the given dimensions.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            bits: vec![false; rows * cols],
        }
    }

    /// Empty mask shaped like `grid`.
    #[must_use]
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Mask of the given positions.
    #[must_use]
    pub fn from_positions(grid: &Grid, positions: impl IntoIterator<Item = Pos>) -> Self {
        let mut mask = Self::for_grid(grid);
        for pos in positions {
            mask.insert(pos);
        }
        mask
    }

    /// Mark a position. Returns `true` if it was not marked yet.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the mask.
    pub fn insert(&mut self, pos: Pos) -> bool {
        assert!(
            pos.row < self.rows && pos.col < self.cols,
            "position {pos} is outside the {}x{} mask",
            self.rows,
            self.cols
        );
        let idx = pos.row * self.cols + pos.col;
        !std::mem::replace(&mut self.bits[idx], true)
    }

    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols && self.bits[pos.row * self.cols + pos.col]
    }

    /// Number of marked positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&bit| bit)
    }

    /// Marked positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .map(move |(idx, _)| Pos::new(idx / cols, idx % cols))
    }

    /// Mark a whole row.
    pub fn fill_row(&mut self, row: usize) {
        for col in 0..self.cols {
            self.insert(Pos::new(row, col));
        }
    }

    /// Mark a whole column.
    pub fn fill_col(&mut self, col: usize) {
        for row in 0..self.rows {
            self.insert(Pos::new(row, col));
        }
    }

    /// Mark the square of the given radius around `center`, clipped to the grid.
    pub fn fill_square(&mut self, center: Pos, radius: usize) {
        for row in self.span(center.row, radius, self.rows) {
            for col in self.span(center.col, radius, self.cols) {
                self.insert(Pos::new(row, col));
            }
        }
    }

    /// Mark the rows within `radius` of `center`'s row and the columns within
    /// `radius` of its column.
    pub fn fill_cross(&mut self, center: Pos, radius: usize) {
        for row in self.span(center.row, radius, self.rows) {
            self.fill_row(row);
        }
        for col in self.span(center.col, radius, self.cols) {
            self.fill_col(col);
        }
    }

    /// Whether any position is marked in both masks.
    #[must_use]
    pub fn overlaps(&self, other: &CellMask) -> bool {
        self.bits.iter().zip(&other.bits).any(|(&a, &b)| a && b)
    }

    fn span(&self, center: usize, radius: usize, len: usize) -> std::ops::RangeInclusive<usize> {
        center.saturating_sub(radius)..=(center + radius).min(len - 1)
    }
}
