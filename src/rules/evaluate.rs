//! Scoring a set of face-up cards.
//!
//! The highest rank value wins, with one house rule: if an Ace and a 2
//! are both on the table, the 2 is treated as the highest card.

use smallvec::SmallVec;

use super::round::CardsPlayed;
use crate::cards::Rank;
use crate::core::PlayerId;

/// Result of comparing one set of face-up cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Winning value after the two-beats-ace rule.
    pub highest_value: u8,
    /// Every player holding `highest_value`, ascending.
    pub winners: SmallVec<[PlayerId; 4]>,
}

impl Evaluation {
    /// More than one player holds the winning value.
    #[must_use]
    pub fn is_war(&self) -> bool {
        self.winners.len() > 1
    }

    #[must_use]
    pub fn sole_winner(&self) -> Option<PlayerId> {
        match self.winners.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }
}

/// Score `cards_played`. Returns `None` when no card was played.
///
/// ```
/// use war_engine::cards::{Card, Rank, Suit};
/// use war_engine::core::PlayerId;
/// use war_engine::rules::{evaluate, CardsPlayed};
///
/// let played: CardsPlayed = [
///     (PlayerId::new(0), Card::new(Rank::Ace, Suit::Spades)),
///     (PlayerId::new(1), Card::new(Rank::Two, Suit::Hearts)),
/// ]
/// .into_iter()
/// .collect();
///
/// let result = evaluate(&played).unwrap();
/// assert_eq!(result.highest_value, 2);
/// assert_eq!(result.sole_winner(), Some(PlayerId::new(1)));
/// ```
#[must_use]
pub fn evaluate(cards_played: &CardsPlayed) -> Option<Evaluation> {
    let mut highest_value = cards_played.iter().map(|(_, c)| c.rank_value()).max()?;

    if highest_value == Rank::Ace.value()
        && cards_played.iter().any(|(_, c)| c.rank_value() == Rank::Two.value())
    {
        highest_value = Rank::Two.value();
    }

    let mut winners: SmallVec<[PlayerId; 4]> = cards_played
        .iter()
        .filter(|(_, c)| c.rank_value() == highest_value)
        .map(|(p, _)| p)
        .collect();
    winners.sort_unstable();

    Some(Evaluation {
        highest_value,
        winners,
    })
}
