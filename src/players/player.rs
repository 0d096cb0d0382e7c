//! Player piles, status and card submission.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::core::{GameRng, PlayerId, Result, WarError};
use crate::events::{CardPlayed, Dispatchers, PlayerEliminated};
use crate::zones::{Pile, PilePosition};

/// A participant at the table.
///
/// ## Status
///
/// `is_active` is a stored flag, not a computed one: it only changes in
/// [`Player::refresh_active_status`], which eliminates the player the first
/// time it sees both piles empty. A card the player has on the table still
/// counts as theirs until the round resolves, so a player who plays their
/// last card and wins the round keeps playing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    human: bool,
    draw_pile: Pile,
    discard_pile: Pile,
    active: bool,
    can_play_this_round: bool,
    in_war: bool,
}

impl Player {
    /// Create a player with empty piles.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self::with_piles(id, name, Vec::new(), Vec::new())
    }

    /// Create a player holding the given piles.
    ///
    /// The last card of `draw` is the top of the draw pile.
    pub fn with_piles(id: PlayerId, name: impl Into<String>, draw: Vec<Card>, discard: Vec<Card>) -> Self {
        Self {
            id,
            name: name.into(),
            human: false,
            draw_pile: Pile::from(draw),
            discard_pile: Pile::from(discard),
            active: true,
            can_play_this_round: true,
            in_war: false,
        }
    }

    /// Mark the player as human (builder pattern).
    #[must_use]
    pub fn with_human(mut self, human: bool) -> Self {
        self.human = human;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.human
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    /// Cards across both piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn can_play_this_round(&self) -> bool {
        self.can_play_this_round
    }

    #[must_use]
    pub fn is_in_war(&self) -> bool {
        self.in_war
    }

    pub fn set_can_play_this_round(&mut self, can_play: bool) {
        self.can_play_this_round = can_play;
    }

    /// Place a dealt card on top of the draw pile.
    pub fn deal(&mut self, card: Card) {
        self.draw_pile.add(card, PilePosition::Top);
    }

    /// Recompute the active flag.
    ///
    /// Eliminates the player, publishing exactly one [`PlayerEliminated`],
    /// the first time both piles are found empty. An eliminated player
    /// never comes back. Returns the (possibly updated) active flag.
    pub fn refresh_active_status(&mut self, events: &mut Dispatchers) -> bool {
        if self.active && self.card_count() == 0 {
            self.active = false;
            self.can_play_this_round = false;
            info!(player = %self.name, "player eliminated");
            events
                .eliminated
                .publish(self.id, &PlayerEliminated { player: self.id });
        }
        self.active
    }

    /// Play the top card of the draw pile.
    ///
    /// - Fails with [`WarError::Inactive`] if the player is out of the game.
    /// - A second play in the same round (outside a war) is a no-op.
    /// - An empty draw pile is refilled from the shuffled discard pile.
    ///
    /// Normally the card is published on the play channel and `None` is
    /// returned. In war mode the card is returned face down instead.
    pub fn play_card(&mut self, rng: &mut GameRng, events: &mut Dispatchers) -> Result<Option<Card>> {
        if !self.active {
            return Err(self.inactive());
        }
        if !self.can_play_this_round && !self.in_war {
            return Ok(None);
        }
        if self.card_count() == 0 {
            self.refresh_active_status(events);
            return Err(self.inactive());
        }
        if self.draw_pile.is_empty() {
            self.recycle_discard_pile(rng);
        }

        let Some(card) = self.draw_pile.pop_top() else {
            return Err(self.inactive());
        };

        if self.in_war {
            return Ok(Some(card));
        }

        self.can_play_this_round = false;
        debug!(player = %self.name, card = %card, "card played");
        events.played.publish(self.id, &CardPlayed { player: self.id, card });
        Ok(None)
    }

    /// Submit face-down war cards.
    ///
    /// Draws `cards - 1` cards (none when `cards <= 1`): the face-up card
    /// that follows is counted as part of the war. Re-opens the play gate
    /// so that face-up card can be played afterwards.
    pub fn play_war_cards(
        &mut self,
        cards: usize,
        rng: &mut GameRng,
        events: &mut Dispatchers,
    ) -> Result<Vec<Card>> {
        self.in_war = true;
        self.can_play_this_round = true;
        let drawn: Result<Vec<Option<Card>>> = (1..cards).map(|_| self.play_card(rng, events)).collect();
        self.in_war = false;
        Ok(drawn?.into_iter().flatten().collect())
    }

    /// Add won cards to the discard pile, keeping their order.
    pub fn pick_up_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend_top(cards);
    }

    fn recycle_discard_pile(&mut self, rng: &mut GameRng) {
        self.discard_pile.shuffle(rng);
        self.draw_pile = self.discard_pile.take_all();
        debug!(player = %self.name, cards = self.draw_pile.len(), "discard pile recycled");
    }

    fn inactive(&self) -> WarError {
        WarError::Inactive {
            name: self.name.clone(),
        }
    }
}
