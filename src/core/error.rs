//! Error types.
//!
//! Only conditions a caller can act on are errors:
//!
//! - [`ConfigError`]: rejected at setup time, before any gameplay step.
//! - [`UnplayableBoard`]: raised by the driver when a board cannot be played
//!   on; the caller decides whether to abort or generate a new board.
//! - [`LayoutError`]: a text fixture could not be parsed.
//!
//! Broken invariants (swapping a locked cell, writing over an out-of-play
//! cell, indexing off the grid) are bugs in the caller and panic instead.

use super::cell::GemKind;

/// Invalid board, filler or session configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("palette must contain at least one color")]
    NoColors,

    #[error("{zone} zone asks for {requested} rows but only {available} can be given up")]
    TooManyRows {
        zone: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("{zone} zone asks for {requested} columns but only {available} can be given up")]
    TooManyCols {
        zone: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("special seeding needs at least one gem kind")]
    NoSpecialKinds,

    #[error("{0:?} is not a special gem kind")]
    NotSpecial(GemKind),

    #[error("cannot seed {requested} special gems into {available} free cells")]
    TooManySpecials { requested: usize, available: usize },

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

/// The board cannot be played on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnplayableBoard {
    #[error("no legal move after {shuffles} shuffles")]
    TooManyShuffles { shuffles: u32 },

    #[error("{combinations} combination rounds after only {swaps} swaps")]
    Degenerate { combinations: u32, swaps: u32 },

    #[error("level for seed {seed} repeats the level for seed {earlier}")]
    DuplicateLevel { seed: u64, earlier: u64 },
}

/// Failure to read a text board layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("bad cell token {token:?} at row {row}, column {col}")]
    BadToken {
        token: String,
        row: usize,
        col: usize,
    },
}

/// Any error the engine or its reference driver reports.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unplayable board: {0}")]
    Unplayable(#[from] UnplayableBoard),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

impl EngineError {
    /// Whether a driver can recover by generating a fresh board.
    #[must_use]
    pub const fn is_unplayable(&self) -> bool {
        matches!(self, Self::Unplayable(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
