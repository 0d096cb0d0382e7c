//! Card model: ranks, suits, cards and the 52-card deck.
//!
//! ## Key Types
//!
//! - `Rank`: 2 through Ace, with comparison values 2..=14
//! - `Suit`: hearts, spades, diamonds, clubs
//! - `Card`: immutable (rank, suit) value, compared by rank value only
//! - `Deck`: exactly one card per (rank, suit) pair

pub mod card;
pub mod deck;

pub use card::{Card, CardColor, Rank, Suit};
pub use deck::{build_deck, shuffle, Deck, DECK_SIZE};
