//! The standard 52-card deck.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::GameRng;

pub const DECK_SIZE: usize = 52;

/// An ordered deck of cards.
///
/// A freshly built deck holds every (rank, suit) pair exactly once,
/// suit by suit (hearts, spades, diamonds, clubs), ranks ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a complete deck in construction order.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        shuffle(&mut self.cards, rng);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

/// Build a complete 52-card deck.
#[must_use]
pub fn build_deck() -> Deck {
    Deck::standard()
}

/// Uniformly permute `cards` in place (Fisher–Yates).
pub fn shuffle<T>(cards: &mut [T], rng: &mut GameRng) {
    rng.shuffle(cards);
}
