//! Board and filler configuration.
//!
//! Every component is parameterized by an explicit config struct; there are
//! no hidden defaults beyond the `Default` impls documented here. The random
//! source is never part of a config: callers pass their [`GameRng`] to each
//! step.
//!
//! [`GameRng`]: super::GameRng

use serde::{Deserialize, Serialize};

use super::cell::GemKind;
use super::error::ConfigError;

/// Board dimensions and palette size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of palette colors (typically 4-7).
    pub colors: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            colors: 6,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub const fn new(rows: usize, cols: usize, colors: u8) -> Self {
        Self { rows, cols, colors }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.colors == 0 {
            return Err(ConfigError::NoColors);
        }
        Ok(())
    }
}

/// Disabled and double-locked zones set up once at board creation.
///
/// With `lock_border` the zones hug the board edges symmetrically: the
/// outermost columns on both sides and the bottom rows. Without it, the
/// given number of rows and columns are picked at random. The top row is
/// never disabled or locked in row terms, since refills enter there.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderConfig {
    /// Rows marked out of play.
    pub disabled_rows: usize,
    /// Columns marked out of play (per side when symmetric).
    pub disabled_cols: usize,
    /// Rows made double-locked.
    pub locked_rows: usize,
    /// Columns made double-locked (per side when symmetric).
    pub locked_cols: usize,
    /// Symmetric border placement instead of random indices.
    pub lock_border: bool,
}

impl BorderConfig {
    /// No disabled or locked cells.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric double-locked border.
    #[must_use]
    pub fn locked_border(rows: usize, cols: usize) -> Self {
        Self {
            locked_rows: rows,
            locked_cols: cols,
            lock_border: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_disabled(mut self, rows: usize, cols: usize) -> Self {
        self.disabled_rows = rows;
        self.disabled_cols = cols;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, rows: usize, cols: usize) -> Self {
        self.locked_rows = rows;
        self.locked_cols = cols;
        self
    }

    #[must_use]
    pub fn symmetric(mut self, lock_border: bool) -> Self {
        self.lock_border = lock_border;
        self
    }

    /// Check the zones fit a `rows x cols` board.
    pub fn validate(&self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        // Row 0 always stays available.
        let row_budget = rows.saturating_sub(1);
        for (zone, zone_rows) in [("disabled", self.disabled_rows), ("locked", self.locked_rows)] {
            if zone_rows > row_budget {
                return Err(ConfigError::TooManyRows {
                    zone,
                    requested: zone_rows,
                    available: row_budget,
                });
            }
        }

        let (disabled_cols, locked_cols) = if self.lock_border {
            (self.disabled_cols * 2, self.locked_cols * 2)
        } else {
            (self.disabled_cols, self.locked_cols)
        };
        // At least one column must stay in play; all of them may be locked.
        let disable_budget = cols.saturating_sub(1);
        if disabled_cols > disable_budget {
            return Err(ConfigError::TooManyCols {
                zone: "disabled",
                requested: disabled_cols,
                available: disable_budget,
            });
        }
        if locked_cols > cols {
            return Err(ConfigError::TooManyCols {
                zone: "locked",
                requested: locked_cols,
                available: cols,
            });
        }
        Ok(())
    }
}

/// Pre-built special gems placed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSeedConfig {
    /// How many special gems to place.
    pub count: usize,
    /// Kinds drawn uniformly for each placed gem.
    pub kinds: Vec<GemKind>,
    /// Palette size for colored specials.
    pub colors: u8,
}

impl SpecialSeedConfig {
    #[must_use]
    pub fn new(count: usize, kinds: Vec<GemKind>, colors: u8) -> Self {
        Self {
            count,
            kinds,
            colors,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors == 0 {
            return Err(ConfigError::NoColors);
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::NoSpecialKinds);
        }
        if let Some(&kind) = self.kinds.iter().find(|kind| !kind.is_special()) {
            return Err(ConfigError::NotSpecial(kind));
        }
        Ok(())
    }
}

/// Top-row refill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopFillConfig {
    /// Number of palette colors for new gems.
    pub colors: u8,
    /// Chance that a refill is a colorless locked filler instead of a gem.
    pub locked_fraction: f64,
}

impl TopFillConfig {
    #[must_use]
    pub const fn new(colors: u8) -> Self {
        Self {
            colors,
            locked_fraction: 0.0,
        }
    }

    #[must_use]
    pub fn with_locked_fraction(mut self, fraction: f64) -> Self {
        self.locked_fraction = fraction;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors == 0 {
            return Err(ConfigError::NoColors);
        }
        if !(0.0..=1.0).contains(&self.locked_fraction) {
            return Err(ConfigError::InvalidProbability(self.locked_fraction));
        }
        Ok(())
    }
}

/// Heuristic points given to legal moves during enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveWeights {
    /// Per completed line detected around the swapped cells.
    pub line: u32,
    /// For a special+special or zapper swap.
    pub special_pair: u32,
}

impl Default for MoveWeights {
    fn default() -> Self {
        Self {
            line: 1,
            special_pair: 5,
        }
    }
}
