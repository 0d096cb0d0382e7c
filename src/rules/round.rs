//! Round bookkeeping: cards on the table and round reports.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{PlayerId, MAX_PLAYERS};

/// Face-up cards of the current round or war step, keyed by player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardsPlayed {
    cards: FxHashMap<PlayerId, Card>,
}

impl CardsPlayed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `player`'s card, returning the card it replaced.
    pub fn record(&mut self, player: PlayerId, card: Card) -> Option<Card> {
        self.cards.insert(player, card)
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<Card> {
        self.cards.get(&player).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Plays in ascending player order.
    #[must_use]
    pub fn sorted(&self) -> SmallVec<[(PlayerId, Card); MAX_PLAYERS]> {
        let mut plays: SmallVec<[(PlayerId, Card); MAX_PLAYERS]> =
            self.cards.iter().map(|(&p, &c)| (p, c)).collect();
        plays.sort_unstable_by_key(|(p, _)| *p);
        plays
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Card)> + '_ {
        self.cards.iter().map(|(&p, &c)| (p, c))
    }
}

impl FromIterator<(PlayerId, Card)> for CardsPlayed {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Card)>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// One evaluation inside a round: the opening comparison or a war.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStep {
    /// Face-down cards each participant forfeited before this step's
    /// face-up card. Empty for the opening comparison.
    pub face_down: Vec<(PlayerId, usize)>,
    /// Face-up cards, ascending player order.
    pub plays: Vec<(PlayerId, Card)>,
    /// Winning value after the two-beats-ace rule.
    pub highest_value: u8,
    /// Players holding `highest_value`.
    pub winners: Vec<PlayerId>,
}

/// Summary of a resolved round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u64,
    pub steps: Vec<RoundStep>,
    /// Who collected the spoils. `None` when every tied player ran out of
    /// cards during a war.
    pub winner: Option<PlayerId>,
    /// Cards collected at the end of the round.
    pub spoils: usize,
    /// Players eliminated while this round was running or resolving.
    pub eliminated: Vec<PlayerId>,
}

impl RoundReport {
    /// Number of wars fought in this round.
    #[must_use]
    pub fn wars(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Face-down cards forfeited by `player` across every war.
    #[must_use]
    pub fn face_down_by(&self, player: PlayerId) -> usize {
        self.steps
            .iter()
            .flat_map(|step| step.face_down.iter())
            .filter(|(p, _)| *p == player)
            .map(|(_, n)| *n)
            .sum()
    }
}
