//! The board's cell matrix.
//!
//! `Grid` stores one [`Cell`] per position in row-major order. Row 0 is the
//! top row (where refills enter); gravity pulls towards higher row indices.
//!
//! ## Text layout
//!
//! `Display` and `FromStr` use a whitespace-separated token per cell, one
//! line per row:
//!
//! | token | cell |
//! |-------|------|
//! | `#` | out of play |
//! | `.` | empty |
//! | `3` | simple gem, color 3 |
//! | `=3` | row stripe, color 3 |
//! | `\|3` | column stripe, color 3 |
//! | `*3` | bomb, color 3 |
//! | `Z` | zapper |
//!
//! Any token except `#` may carry a lock suffix: `l` locked, `L`
//! double-locked, `!` exploding. `.L` is a double-locked empty cell.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, GemColor, GemKind, LockState};
use super::error::LayoutError;

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonally adjacent.
    #[must_use]
    pub const fn is_adjacent(self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Orthogonal directions as `(row, col)` steps: up, left, down, right.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Fixed-size matrix of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty and unlocked.
    ///
    /// # Panics
    ///
    /// If either dimension is zero. Use [`BoardConfig::validate`] first when
    /// dimensions come from outside.
    ///
    /// [`BoardConfig::validate`]: crate::core::BoardConfig::validate
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must be at least 1x1, got {rows}x{cols}");
        Self {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows * cols],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// `pos` shifted by `(dr, dc)`, if that stays on the grid.
    #[must_use]
    pub fn offset(&self, pos: Pos, dr: isize, dc: isize) -> Option<Pos> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let moved = Pos::new(row, col);
        self.contains(moved).then_some(moved)
    }

    /// Cell at `pos`, or `None` off the grid.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        if self.contains(pos) {
            self.cells.get(self.index_of(pos))
        } else {
            None
        }
    }

    /// Signed lookup for scanning code: off-grid reads as out of play.
    #[must_use]
    pub fn cell_at(&self, row: isize, col: isize) -> Cell {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => self.get(Pos::new(row, col)).copied().unwrap_or(Cell::OUT_OF_PLAY),
            _ => Cell::OUT_OF_PLAY,
        }
    }

    /// Overwrite a cell.
    ///
    /// # Panics
    ///
    /// If `pos` is off the grid, or if it would change an out-of-play cell.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.checked_index(pos);
        let current = self.cells[idx];
        assert!(
            !current.is_out_of_play() || current == cell,
            "out-of-play cell at {pos} cannot change"
        );
        self.cells[idx] = cell;
    }

    /// Reset a cell to empty, unlocked and colorless.
    pub fn clear(&mut self, pos: Pos) {
        self.set(pos, Cell::EMPTY);
    }

    /// Change only the lock level of a cell.
    pub fn set_lock(&mut self, pos: Pos, lock: LockState) {
        let cell = self[pos];
        self.set(pos, cell.with_lock(lock));
    }

    /// Exchange two full cells.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let (ia, ib) = (self.checked_index(a), self.checked_index(b));
        assert!(
            !self.cells[ia].is_out_of_play() && !self.cells[ib].is_out_of_play(),
            "cannot swap out-of-play cells {a} and {b}"
        );
        self.cells.swap(ia, ib);
    }

    /// Move the cell at `from` to `to`, leaving `from` empty.
    pub fn move_cell(&mut self, from: Pos, to: Pos) {
        let cell = self[from];
        self.set(to, cell);
        self.clear(from);
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }

    /// `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.positions().zip(self.cells.iter().copied())
    }

    /// On-grid orthogonal neighbors (up, left, down, right).
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(pos, dr, dc))
    }

    /// Number of cells satisfying `pred`.
    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| pred(cell)).count()
    }

    fn index_of(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    fn checked_index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside the {}x{} grid",
            self.rows,
            self.cols
        );
        self.index_of(pos)
    }
}

impl Index<Pos> for Grid {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Cell {
        &self.cells[self.checked_index(pos)]
    }
}

fn cell_token(cell: &Cell) -> String {
    let body = match cell.kind {
        GemKind::OutOfPlay => return "#".to_string(),
        GemKind::Empty => ".".to_string(),
        GemKind::Simple => cell.color.to_string(),
        GemKind::StripeRow => format!("={}", cell.color),
        GemKind::StripeCol => format!("|{}", cell.color),
        GemKind::Bomb => format!("*{}", cell.color),
        GemKind::Zapper => "Z".to_string(),
    };
    let suffix = match cell.lock {
        LockState::Normal => "",
        LockState::Locked => "l",
        LockState::DoubleLocked => "L",
        LockState::Exploding => "!",
    };
    body + suffix
}

fn parse_token(token: &str) -> Option<Cell> {
    if token == "#" {
        return Some(Cell::OUT_OF_PLAY);
    }
    let mut chars = token.chars();
    let first = chars.next()?;
    let (kind, rest) = match first {
        '.' => (GemKind::Empty, chars.as_str()),
        'Z' => (GemKind::Zapper, chars.as_str()),
        '=' => (GemKind::StripeRow, chars.as_str()),
        '|' => (GemKind::StripeCol, chars.as_str()),
        '*' => (GemKind::Bomb, chars.as_str()),
        c if c.is_ascii_digit() => (GemKind::Simple, token),
        _ => return None,
    };

    let split = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (digits, suffix) = rest.split_at(split);
    let color = if kind.is_colored() {
        let color: u8 = digits.parse().ok()?;
        if color == 0 {
            return None;
        }
        GemColor::new(color)
    } else if digits.is_empty() {
        GemColor::NONE
    } else {
        return None;
    };

    let lock = match suffix {
        "" => LockState::Normal,
        "l" => LockState::Locked,
        "L" => LockState::DoubleLocked,
        "!" => LockState::Exploding,
        _ => return None,
    };
    Some(Cell::new(kind, color, lock))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| format!("{:<3}", cell_token(&self[Pos::new(row, col)])))
                .collect();
            writeln!(f, "{}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let first = lines.first().ok_or(LayoutError::Empty)?;
        let cols = first.split_whitespace().count();
        if cols == 0 {
            return Err(LayoutError::Empty);
        }

        let mut grid = Grid::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != cols {
                return Err(LayoutError::Ragged {
                    row,
                    expected: cols,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.into_iter().enumerate() {
                let cell = parse_token(token).ok_or_else(|| LayoutError::BadToken {
                    token: token.to_string(),
                    row,
                    col,
                })?;
                grid.cells[row * cols + col] = cell;
            }
        }
        Ok(grid)
    }
}
