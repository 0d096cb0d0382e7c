//! Event payloads.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// A player put a card face up.
///
/// Published once per player per round (and once per war step for tied
/// players). Face-down war cards are never published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlayed {
    pub player: PlayerId,
    pub card: Card,
}

/// A player has no cards left and is out of the game.
///
/// Published at most once per player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEliminated {
    pub player: PlayerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_event_serialization() {
        let event = CardPlayed {
            player: PlayerId::new(3),
            card: Card::new(Rank::Seven, Suit::Diamonds),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: CardPlayed = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
