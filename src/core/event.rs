//! Append-only event log.
//!
//! The engine records what happened while it resolved a step: gems
//! activated, locks loosened, gems destroyed, special pairs combined.
//! Collaborators translate events into sound, visuals and score. The engine
//! itself never reads the log back.
//!
//! ## Reading
//!
//! Readers remember how many events they have consumed and ask for the
//! suffix:
//!
//! ```
//! use rust_match3::core::{Event, EventLog, GemKind};
//!
//! let mut log = EventLog::new();
//! log.push(Event::Destroyed(3));
//! let seen = log.len();
//! log.push(Event::Activated(GemKind::Bomb));
//!
//! let fresh: Vec<_> = log.since(seen).collect();
//! assert_eq!(fresh, vec![&Event::Activated(GemKind::Bomb)]);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::GemKind;

/// A special-pair combination, identified by its two-digit code.
///
/// The tens digit is the higher-ranked gem, the units digit the lower one
/// (stripes count as 2 whatever their orientation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combo {
    StripeStripe,
    BombStripe,
    BombBomb,
    ZapperSimple,
    ZapperStripe,
    ZapperBomb,
    ZapperZapper,
}

impl Combo {
    /// All combos, in code order.
    pub const ALL: [Combo; 7] = [
        Combo::StripeStripe,
        Combo::BombStripe,
        Combo::BombBomb,
        Combo::ZapperSimple,
        Combo::ZapperStripe,
        Combo::ZapperBomb,
        Combo::ZapperZapper,
    ];

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Combo::StripeStripe => 22,
            Combo::BombStripe => 42,
            Combo::BombBomb => 44,
            Combo::ZapperSimple => 51,
            Combo::ZapperStripe => 52,
            Combo::ZapperBomb => 54,
            Combo::ZapperZapper => 55,
        }
    }

    /// Position in [`Combo::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|combo| combo.code() == code)
    }

    /// Zapper combined with a gem of the given kind.
    #[must_use]
    pub const fn zapper_with(kind: GemKind) -> Self {
        match kind {
            GemKind::StripeRow | GemKind::StripeCol => Combo::ZapperStripe,
            GemKind::Bomb => Combo::ZapperBomb,
            GemKind::Zapper => Combo::ZapperZapper,
            _ => Combo::ZapperSimple,
        }
    }
}

/// One thing that happened on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// A gem of this kind went off.
    Activated(GemKind),
    /// This many lock levels were removed.
    Unlocked(u32),
    /// This many simple gems were cleared.
    Destroyed(u32),
    /// Two special gems were swapped into each other.
    Combined(Combo),
}

impl Event {
    /// Short name of the event kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Event::Activated(_) => "activated",
            Event::Unlocked(_) => "unlocked",
            Event::Destroyed(_) => "destroyed",
            Event::Combined(_) => "combined",
        }
    }

    /// The event's number: kind code, count, or combo code.
    #[must_use]
    pub const fn magnitude(&self) -> i64 {
        match self {
            Event::Activated(kind) => kind.code() as i64,
            Event::Unlocked(count) | Event::Destroyed(count) => *count as i64,
            Event::Combined(combo) => combo.code() as i64,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name(), self.magnitude())
    }
}

/// Append-only sequence of events.
///
/// Backed by a persistent vector so snapshots of a board (lookahead copies)
/// share the history instead of copying it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<Event>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }

    /// Events appended after the first `index` ones.
    pub fn since(&self, index: usize) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().skip(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }
}
