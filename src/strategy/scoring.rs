//! Game statistics from the event log.

use serde::{Deserialize, Serialize};

use crate::core::{Combo, Event, GemKind};

/// Summary of a game (or any slice of its events).
///
/// The score counts ten points per kind code for every activation (a bomb
/// going off is worth 40) plus one point per destroyed gem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u64,
    pub destroyed: u64,
    pub unlocked: u64,
    /// Stripe activations, either orientation.
    pub stripes: u64,
    pub bombs: u64,
    pub zappers: u64,
    /// Combination counts, indexed like [`Combo::ALL`].
    pub combos: [u64; 7],
}

impl ScoreCard {
    /// Tally a sequence of events.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut card = Self::default();
        for event in events {
            card.add(event);
        }
        card
    }

    /// Fold one event into the card.
    pub fn add(&mut self, event: &Event) {
        match *event {
            Event::Activated(kind) => {
                match kind {
                    GemKind::StripeRow | GemKind::StripeCol => self.stripes += 1,
                    GemKind::Bomb => self.bombs += 1,
                    GemKind::Zapper => self.zappers += 1,
                    _ => {}
                }
                self.score += 10 * u64::try_from(kind.code()).unwrap_or(0);
            }
            Event::Unlocked(count) => self.unlocked += u64::from(count),
            Event::Destroyed(count) => {
                self.destroyed += u64::from(count);
                self.score += u64::from(count);
            }
            Event::Combined(combo) => self.combos[combo.index()] += 1,
        }
    }

    /// How often `combo` happened.
    #[must_use]
    pub fn combo_count(&self, combo: Combo) -> u64 {
        self.combos[combo.index()]
    }

    /// Flat row: score, destroyed, unlocked, stripes, bombs, zappers, then
    /// the seven combo counts.
    #[must_use]
    pub fn to_row(&self) -> [u64; 13] {
        let mut row = [0; 13];
        row[..6].copy_from_slice(&[
            self.score,
            self.destroyed,
            self.unlocked,
            self.stripes,
            self.bombs,
            self.zappers,
        ]);
        row[6..].copy_from_slice(&self.combos);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring() {
        let events = [
            Event::Combined(Combo::BombStripe),
            Event::Activated(GemKind::Bomb),
            Event::Activated(GemKind::StripeCol),
            Event::Unlocked(2),
            Event::Destroyed(11),
            Event::Activated(GemKind::Simple),
        ];
        let card = ScoreCard::from_events(&events);

        assert_eq!(card.score, 40 + 30 + 11 + 10);
        assert_eq!(card.destroyed, 11);
        assert_eq!(card.unlocked, 2);
        assert_eq!((card.stripes, card.bombs, card.zappers), (1, 1, 0));
        assert_eq!(card.combo_count(Combo::BombStripe), 1);
        assert_eq!(card.combo_count(Combo::BombBomb), 0);
    }

    #[test]
    fn test_row_layout() {
        let card = ScoreCard::from_events(&[Event::Combined(Combo::ZapperZapper), Event::Destroyed(3)]);
        let row = card.to_row();
        assert_eq!(row[0], 3);
        assert_eq!(row[1], 3);
        assert_eq!(row[12], 1);
    }
}
