//! Match shapes.
//!
//! Each pattern is a small footprint drawn as ASCII art (`X` = part of the
//! shape). A pattern matches at an origin when every footprint cell is on
//! the grid, is a free gem, and has the same color. Colorless gems line up
//! with each other like any palette color.
//!
//! | name | shape | reward |
//! |------|-------|--------|
//! | `H3`, `V3` | run of 3 | none |
//! | `H4` | horizontal run of 4 | row stripe |
//! | `V4` | vertical run of 4 | column stripe |
//! | `H5`, `V5` | run of 5 | zapper |
//! | `TVD`, `TVU`, `THR`, `THL` | T, four rotations | bomb |
//! | `LUL`, `LLL`, `LLR`, `LUR` | L, four rotations | bomb |

use smallvec::SmallVec;

use crate::core::{GemColor, GemKind, Grid, Pos};

/// Footprint cells as `(row, col)` offsets from the origin.
pub type Footprint = SmallVec<[(usize, usize); 5]>;

/// One named shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    cells: Footprint,
    reward: Option<GemKind>,
}

impl Pattern {
    /// Build a pattern from rows of `X` and `.`.
    ///
    /// # Panics
    ///
    /// If the art contains no `X`.
    #[must_use]
    pub fn from_art(name: &'static str, art: &[&str], reward: Option<GemKind>) -> Self {
        let cells: Footprint = art
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == 'X')
                    .map(move |(col, _)| (row, col))
            })
            .collect();
        assert!(!cells.is_empty(), "pattern {name} has no cells");
        Self { name, cells, reward }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Special gem spawned when this shape is matched.
    #[must_use]
    pub const fn reward(&self) -> Option<GemKind> {
        self.reward
    }

    /// Number of cells covered.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().copied()
    }

    /// Color of the match at `origin`, if the whole footprint fits and lines up.
    #[must_use]
    pub fn match_at(&self, grid: &Grid, origin: Pos) -> Option<GemColor> {
        let mut color = None;
        for (dr, dc) in self.offsets() {
            let pos = Pos::new(origin.row + dr, origin.col + dc);
            let cell = grid.get(pos)?;
            if !cell.is_matchable() {
                return None;
            }
            match color {
                None => color = Some(cell.color),
                Some(c) if c != cell.color => return None,
                Some(_) => {}
            }
        }
        color
    }

    /// Absolute footprint positions at `origin`.
    #[must_use]
    pub fn cells_at(&self, origin: Pos) -> SmallVec<[Pos; 5]> {
        self.offsets()
            .map(|(dr, dc)| Pos::new(origin.row + dr, origin.col + dc))
            .collect()
    }
}

/// The ordered set of shapes the combiner scans for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl PatternLibrary {
    /// Runs, T-shapes and L-shapes, in scan order.
    #[must_use]
    pub fn standard() -> Self {
        use GemKind::{Bomb, StripeCol, StripeRow, Zapper};

        let patterns = vec![
            Pattern::from_art("H3", &["XXX"], None),
            Pattern::from_art("H4", &["XXXX"], Some(StripeRow)),
            Pattern::from_art("H5", &["XXXXX"], Some(Zapper)),
            Pattern::from_art("V3", &["X", "X", "X"], None),
            Pattern::from_art("V4", &["X", "X", "X", "X"], Some(StripeCol)),
            Pattern::from_art("V5", &["X", "X", "X", "X", "X"], Some(Zapper)),
            Pattern::from_art("TVD", &["XXX", ".X.", ".X."], Some(Bomb)),
            Pattern::from_art("TVU", &[".X.", ".X.", "XXX"], Some(Bomb)),
            Pattern::from_art("THR", &["X..", "XXX", "X.."], Some(Bomb)),
            Pattern::from_art("THL", &["..X", "XXX", "..X"], Some(Bomb)),
            Pattern::from_art("LUL", &["XXX", "X..", "X.."], Some(Bomb)),
            Pattern::from_art("LLL", &["X..", "X..", "XXX"], Some(Bomb)),
            Pattern::from_art("LLR", &["..X", "..X", "XXX"], Some(Bomb)),
            Pattern::from_art("LUR", &["XXX", "..X", "..X"], Some(Bomb)),
        ];
        Self { patterns }
    }

    /// Custom library, scanned in the given order.
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.patterns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
