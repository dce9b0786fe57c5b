//! Per-tick change lists returned by gravity and refill.
//!
//! These are animation hints only: which destination cell changed and how
//! the gem got there. Order is the internal scan order of the step.

use serde::{Deserialize, Serialize};

use super::grid::Pos;

/// How a gem arrived at a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeReason {
    /// Fell straight down from the cell above.
    DroppedFromTop,
    /// Slid down from the upper-left neighbor.
    DroppedFromTopLeft,
    /// Slid down from the upper-right neighbor.
    DroppedFromTopRight,
    /// A new simple gem entered the top row.
    Refilled,
    /// A colorless locked filler entered the top row.
    RefilledLocked,
}

impl ChangeReason {
    /// Column step from the gem's previous position to its new one.
    #[must_use]
    pub const fn column_shift(self) -> isize {
        match self {
            ChangeReason::DroppedFromTopLeft => 1,
            ChangeReason::DroppedFromTopRight => -1,
            _ => 0,
        }
    }
}

/// One changed destination cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    pub pos: Pos,
    pub reason: ChangeReason,
}

impl Change {
    #[must_use]
    pub const fn new(pos: Pos, reason: ChangeReason) -> Self {
        Self { pos, reason }
    }
}
