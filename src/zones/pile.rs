//! Ordered card pile.
//!
//! A `Pile` is backed by `im::Vector`, so cloning one for a snapshot is
//! O(1) no matter how many cards it holds.
//!
//! Index 0 is the bottom of the pile, the last index is the top. Cards are
//! played from the top and won cards are appended to the top.
//!
//! ```
//! use war_engine::cards::{Card, Rank, Suit};
//! use war_engine::zones::{Pile, PilePosition};
//!
//! let mut pile = Pile::new();
//! pile.add(Card::new(Rank::Two, Suit::Clubs), PilePosition::Top);
//! pile.add(Card::new(Rank::Ace, Suit::Clubs), PilePosition::Bottom);
//!
//! assert_eq!(pile.top(), Some(&Card::new(Rank::Two, Suit::Clubs)));
//! assert_eq!(pile.pop_top(), Some(Card::new(Rank::Two, Suit::Clubs)));
//! assert_eq!(pile.len(), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::GameRng;

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// The tail, where the next card is played from.
    #[default]
    Top,
    /// The head.
    Bottom,
}

/// Ordered sequence of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card that would be played next.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Remove and return the top card.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Add a single card.
    pub fn add(&mut self, card: Card, position: PilePosition) {
        match position {
            PilePosition::Top => self.cards.push_back(card),
            PilePosition::Bottom => self.cards.push_front(card),
        }
    }

    /// Append cards to the top, keeping their order.
    pub fn extend_top(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Take every card, leaving the pile empty.
    #[must_use]
    pub fn take_all(&mut self) -> Pile {
        std::mem::take(self)
    }

    /// Shuffle the pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards = self.to_vec();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

impl From<Vec<Card>> for Pile {
    /// The last card of the vector becomes the top of the pile.
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
