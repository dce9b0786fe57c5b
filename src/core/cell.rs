//! Cell model: what sits on one grid position.
//!
//! A cell is the triple `(kind, color, lock)`. The three fields are
//! independent but always travel together: gravity, swaps and clears move or
//! reset the whole triple, never a single field.
//!
//! ## Encoding
//!
//! The integer codes match the values collaborators see in snapshots and
//! event magnitudes:
//!
//! | kind | code | lock | code |
//! |------|------|------|------|
//! | OutOfPlay | -1 | Exploding | -1 |
//! | Empty | 0 | Normal | 0 |
//! | Simple | 1 | Locked | 1 |
//! | StripeRow | 2 | DoubleLocked | 2 |
//! | StripeCol | 3 | | |
//! | Bomb | 4 | | |
//! | Zapper | 5 | | |

use serde::{Deserialize, Serialize};

/// What occupies a cell.
///
/// Variants are declared in code order, so the derived `Ord` gives the
/// swap-resolution order `Simple < Stripe < Bomb < Zapper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum GemKind {
    /// Disabled position. Never matches, falls, swaps or changes.
    OutOfPlay = -1,
    /// Nothing here.
    Empty = 0,
    /// Plain colored gem.
    Simple = 1,
    /// Clears its whole row when activated.
    StripeRow = 2,
    /// Clears its whole column when activated.
    StripeCol = 3,
    /// Clears the surrounding 3x3 square when activated.
    Bomb = 4,
    /// Colorless; clears every gem of one color when activated.
    Zapper = 5,
}

impl GemKind {
    /// Integer code of this kind.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Decode an integer code.
    #[must_use]
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::OutOfPlay),
            0 => Some(Self::Empty),
            1 => Some(Self::Simple),
            2 => Some(Self::StripeRow),
            3 => Some(Self::StripeCol),
            4 => Some(Self::Bomb),
            5 => Some(Self::Zapper),
            _ => None,
        }
    }

    /// `kind > Empty`: a gem of some sort.
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        self.code() > 0
    }

    /// Stripe, bomb or zapper.
    #[must_use]
    pub const fn is_special(self) -> bool {
        self.code() > 1
    }

    #[must_use]
    pub const fn is_stripe(self) -> bool {
        matches!(self, Self::StripeRow | Self::StripeCol)
    }

    /// Kinds whose color is meaningful.
    #[must_use]
    pub const fn is_colored(self) -> bool {
        matches!(
            self,
            Self::Simple | Self::StripeRow | Self::StripeCol | Self::Bomb
        )
    }

    /// Whether activating this kind also loosens locks next to everything it hits.
    #[must_use]
    pub const fn exposes_neighbors(self) -> bool {
        matches!(self, Self::Simple | Self::Bomb | Self::Zapper)
    }
}

/// Palette index. `0` is colorless, `1..=N` are the palette colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GemColor(pub u8);

impl GemColor {
    /// No color (empty cells, zappers, locked fillers).
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_colorless(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for GemColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lock level of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum LockState {
    /// Scheduled for the next activation pass.
    Exploding = -1,
    /// Free: matchable, swappable, fallable.
    #[default]
    Normal = 0,
    /// Needs one exposure.
    Locked = 1,
    /// Needs two exposures.
    DoubleLocked = 2,
}

impl LockState {
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Exploding),
            0 => Some(Self::Normal),
            1 => Some(Self::Locked),
            2 => Some(Self::DoubleLocked),
            _ => None,
        }
    }

    /// `Locked` or `DoubleLocked`.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        self.code() > 0
    }

    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }

    #[must_use]
    pub const fn is_exploding(self) -> bool {
        matches!(self, Self::Exploding)
    }

    /// One exposure: drop a lock level. Non-locked states are unchanged.
    #[must_use]
    pub const fn loosened(self) -> Self {
        match self {
            Self::DoubleLocked => Self::Locked,
            Self::Locked => Self::Normal,
            other => other,
        }
    }
}

/// One grid position's `(kind, color, lock)` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: GemKind,
    pub color: GemColor,
    pub lock: LockState,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Empty, unlocked, colorless.
    pub const EMPTY: Self = Self::new(GemKind::Empty, GemColor::NONE, LockState::Normal);

    /// Disabled position. Also returned for off-grid lookups.
    pub const OUT_OF_PLAY: Self = Self::new(GemKind::OutOfPlay, GemColor::NONE, LockState::Normal);

    #[must_use]
    pub const fn new(kind: GemKind, color: GemColor, lock: LockState) -> Self {
        Self { kind, color, lock }
    }

    /// Unlocked simple gem of the given color.
    #[must_use]
    pub const fn simple(color: u8) -> Self {
        Self::new(GemKind::Simple, GemColor(color), LockState::Normal)
    }

    /// Unlocked special gem. Zappers are always stored colorless.
    #[must_use]
    pub const fn special(kind: GemKind, color: GemColor) -> Self {
        let color = if matches!(kind, GemKind::Zapper) {
            GemColor::NONE
        } else {
            color
        };
        Self::new(kind, color, LockState::Normal)
    }

    /// Unlocked colorless zapper.
    #[must_use]
    pub const fn zapper() -> Self {
        Self::special(GemKind::Zapper, GemColor::NONE)
    }

    /// Same cell with a different lock level.
    #[must_use]
    pub const fn with_lock(self, lock: LockState) -> Self {
        Self::new(self.kind, self.color, lock)
    }

    #[must_use]
    pub const fn is_out_of_play(&self) -> bool {
        matches!(self.kind, GemKind::OutOfPlay)
    }

    /// Empty and unlocked: can receive a falling or refilled gem.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        matches!(self.kind, GemKind::Empty) && self.lock.is_normal()
    }

    /// Occupied and unlocked: can fall and can be swapped.
    #[must_use]
    pub const fn is_free_gem(&self) -> bool {
        self.kind.is_occupied() && self.lock.is_normal()
    }

    /// Can take part in a pattern match.
    ///
    /// Colorless gems qualify too: a run of zappers lines up on color 0.
    #[must_use]
    pub const fn is_matchable(&self) -> bool {
        self.is_free_gem()
    }

    /// Whether this cell and `other` complete a line for a swap.
    ///
    /// Colorless gems never count here. Swaps involving a zapper are
    /// scored as special pairs instead.
    #[must_use]
    pub fn matches_color(&self, other: &Cell) -> bool {
        self.is_matchable()
            && other.is_matchable()
            && !self.color.is_colorless()
            && self.color == other.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for code in -1..=5 {
            let kind = GemKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(GemKind::from_code(6), None);
    }

    #[test]
    fn test_kind_order_for_swaps() {
        assert!(GemKind::Simple < GemKind::StripeRow);
        assert!(GemKind::StripeCol < GemKind::Bomb);
        assert!(GemKind::Bomb < GemKind::Zapper);
        assert!(GemKind::Empty < GemKind::Simple);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(!GemKind::OutOfPlay.is_occupied());
        assert!(!GemKind::Empty.is_occupied());
        assert!(GemKind::Simple.is_occupied());
        assert!(!GemKind::Simple.is_special());
        assert!(GemKind::Zapper.is_special());
        assert!(!GemKind::Zapper.is_colored());
        assert!(GemKind::StripeCol.is_stripe());
        assert!(!GemKind::StripeRow.exposes_neighbors());
        assert!(GemKind::Bomb.exposes_neighbors());
    }

    #[test]
    fn test_lock_loosening() {
        assert_eq!(LockState::DoubleLocked.loosened(), LockState::Locked);
        assert_eq!(LockState::Locked.loosened(), LockState::Normal);
        assert_eq!(LockState::Normal.loosened(), LockState::Normal);
        assert_eq!(LockState::Exploding.loosened(), LockState::Exploding);
    }

    #[test]
    fn test_zapper_is_colorless() {
        let cell = Cell::special(GemKind::Zapper, GemColor::new(3));
        assert_eq!(cell.color, GemColor::NONE);
        assert!(cell.is_matchable());
        assert!(!cell.matches_color(&Cell::zapper()));
    }

    #[test]
    fn test_cell_predicates() {
        assert!(Cell::EMPTY.is_vacant());
        assert!(!Cell::EMPTY.with_lock(LockState::Locked).is_vacant());
        assert!(Cell::simple(2).is_matchable());
        assert!(!Cell::simple(2).with_lock(LockState::Locked).is_matchable());
        assert!(!Cell::simple(2).with_lock(LockState::Exploding).is_free_gem());
        assert!(Cell::simple(2).matches_color(&Cell::special(GemKind::Bomb, GemColor::new(2))));
        assert!(!Cell::simple(2).matches_color(&Cell::simple(3)));
        assert!(Cell::OUT_OF_PLAY.is_out_of_play());
    }
}
