//! The round state machine.
//!
//! A round moves through
//! `AwaitingPlays → Evaluating → (WarInProgress → Evaluating)* → SpoilsCollected`.
//!
//! The engine never owns players. Every operation borrows the roster, the
//! game RNG and the dispatchers from the game that owns them, and plays
//! reach the engine through its inbox rather than through callbacks that
//! would need to borrow the game.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::evaluate::evaluate;
use super::round::{CardsPlayed, RoundReport, RoundStep};
use crate::cards::Card;
use crate::core::{GameRng, PlayerId, PlayerSet, Result, WarError};
use crate::events::{CardPlayed, Dispatchers, Inbox, PlayerEliminated};
use crate::players::Player;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// One player holds every card still in play.
    Winner(PlayerId),
    /// Nobody is left: the last contenders ran out of cards in the same war.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Where the current round is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    AwaitingPlays,
    Evaluating,
    WarInProgress,
    SpoilsCollected,
}

enum WarOutcome {
    /// Every contender played a new face-up card. Carries the face-down
    /// cards each one forfeited.
    Continue(Vec<(PlayerId, usize)>),
    /// Only one tied player could continue.
    Forfeit(PlayerId),
    /// No tied player could continue.
    Exhausted,
}

/// Per-round state and resolution.
#[derive(Debug)]
pub struct RoundEngine {
    war_cards: usize,
    round: u64,
    phase: RoundPhase,
    active_players: PlayerSet,
    has_yet_to_play: PlayerSet,
    cards_played: CardsPlayed,
    spoils: Vec<Card>,
    eliminated: Vec<PlayerId>,
    plays: Inbox<CardPlayed>,
    eliminations: Inbox<PlayerEliminated>,
}

impl RoundEngine {
    /// Create an engine whose wars ask for at most `war_cards` cards.
    #[must_use]
    pub fn new(war_cards: usize) -> Self {
        Self {
            war_cards,
            round: 0,
            phase: RoundPhase::SpoilsCollected,
            active_players: PlayerSet::new(),
            has_yet_to_play: PlayerSet::new(),
            cards_played: CardsPlayed::new(),
            spoils: Vec::new(),
            eliminated: Vec::new(),
            plays: Inbox::new(),
            eliminations: Inbox::new(),
        }
    }

    /// Route `player`'s play and elimination events into this engine.
    pub fn watch(&self, player: PlayerId, events: &mut Dispatchers) {
        events.played.subscribe(player, self.plays.sink());
        events.eliminated.subscribe(player, self.eliminations.sink());
    }

    /// Rounds started so far (1-based once a round is running).
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn war_cards(&self) -> usize {
        self.war_cards
    }

    #[must_use]
    pub fn active_players(&self) -> &PlayerSet {
        &self.active_players
    }

    #[must_use]
    pub fn has_yet_to_play(&self) -> &PlayerSet {
        &self.has_yet_to_play
    }

    /// Face-up cards of the current step. After resolution, the cards of
    /// the deciding step.
    #[must_use]
    pub fn cards_played(&self) -> &CardsPlayed {
        &self.cards_played
    }

    /// Cards at stake that have not been collected yet.
    #[must_use]
    pub fn spoils(&self) -> &[Card] {
        &self.spoils
    }

    /// Begin a new round.
    ///
    /// Refreshes every player's status, then opens the play gate of every
    /// active player and waits for all of them.
    pub fn start_round(&mut self, players: &mut [Player], events: &mut Dispatchers) {
        self.round += 1;
        self.cards_played.clear();
        self.spoils.clear();
        self.eliminated.clear();

        for CardPlayed { player, card } in self.plays.drain() {
            warn!(round = self.round, %player, %card, "returning a play from a finished round");
            if let Some(owner) = players.get_mut(player.index()) {
                owner.pick_up_cards(std::iter::once(card));
            }
        }

        for player in players.iter_mut() {
            player.refresh_active_status(events);
        }
        self.absorb_eliminations();

        self.active_players = players.iter().filter(|p| p.is_active()).map(Player::id).collect();
        for id in self.active_players.iter() {
            players[id.index()].set_can_play_this_round(true);
        }
        self.has_yet_to_play = self.active_players.clone();
        self.phase = RoundPhase::AwaitingPlays;

        debug!(round = self.round, players = self.active_players.len(), "round started");
    }

    /// Record pending plays and eliminations. Once every active player has
    /// played, resolves the round and returns its report.
    pub fn collect_plays(
        &mut self,
        players: &mut [Player],
        rng: &mut GameRng,
        events: &mut Dispatchers,
    ) -> Result<Option<RoundReport>> {
        if self.phase != RoundPhase::AwaitingPlays {
            return Ok(None);
        }

        self.absorb_eliminations();
        self.absorb_plays()?;

        if self.has_yet_to_play.is_empty() && !self.cards_played.is_empty() {
            return self.resolve(players, rng, events).map(Some);
        }
        Ok(None)
    }

    fn resolve(&mut self, players: &mut [Player], rng: &mut GameRng, events: &mut Dispatchers) -> Result<RoundReport> {
        let mut steps = Vec::new();
        let mut face_down = Vec::new();

        let winner = loop {
            self.phase = RoundPhase::Evaluating;
            let Some(evaluation) = evaluate(&self.cards_played) else {
                return Err(halted(self.round, "no face-up cards to evaluate"));
            };

            let plays = self.cards_played.sorted();
            self.spoils.extend(plays.iter().map(|(_, card)| *card));
            steps.push(RoundStep {
                face_down: std::mem::take(&mut face_down),
                plays: plays.to_vec(),
                highest_value: evaluation.highest_value,
                winners: evaluation.winners.to_vec(),
            });

            if let Some(winner) = evaluation.sole_winner() {
                break Some(winner);
            }

            self.phase = RoundPhase::WarInProgress;
            match self.conduct_war(&evaluation.winners, players, rng, events)? {
                WarOutcome::Continue(forfeited) => face_down = forfeited,
                WarOutcome::Forfeit(winner) => break Some(winner),
                WarOutcome::Exhausted => break None,
            }
        };

        let spoils = self.spoils.len();
        match winner {
            Some(id) => {
                let player = &mut players[id.index()];
                info!(
                    round = self.round,
                    winner = %player.name(),
                    spoils,
                    wars = steps.len() - 1,
                    "round won"
                );
                player.pick_up_cards(self.spoils.drain(..));
            }
            None => self.return_spoils(players),
        }
        self.phase = RoundPhase::SpoilsCollected;

        for player in players.iter_mut() {
            player.refresh_active_status(events);
        }
        self.absorb_eliminations();

        Ok(RoundReport {
            round: self.round,
            steps,
            winner,
            spoils,
            eliminated: self.eliminated.clone(),
        })
    }

    /// Run one war step between `tied` players.
    ///
    /// Tied players with no cards left are eliminated first. The rest each
    /// forfeit `threshold - 1` face-down cards, where the threshold is the
    /// configured war size capped by the smallest contender's card count,
    /// then play a new face-up card.
    fn conduct_war(
        &mut self,
        tied: &[PlayerId],
        players: &mut [Player],
        rng: &mut GameRng,
        events: &mut Dispatchers,
    ) -> Result<WarOutcome> {
        let mut contenders = PlayerSet::new();
        for &id in tied {
            if players[id.index()].refresh_active_status(events) {
                contenders.insert(id);
            }
        }
        self.absorb_eliminations();

        if contenders.len() < 2 {
            if contenders.is_empty() {
                warn!(round = self.round, "every tied player is out of cards");
            }
            return Ok(contenders.first().map_or(WarOutcome::Exhausted, WarOutcome::Forfeit));
        }

        let threshold = contenders
            .iter()
            .map(|id| players[id.index()].card_count())
            .min()
            .unwrap_or(0)
            .min(self.war_cards);
        info!(round = self.round, players = contenders.len(), threshold, "war");

        let round = self.round;
        self.cards_played.clear();
        self.has_yet_to_play = contenders.clone();

        let mut forfeited = Vec::with_capacity(contenders.len());
        for id in contenders.iter() {
            let player = &mut players[id.index()];
            let face_down = player
                .play_war_cards(threshold, rng, events)
                .map_err(|e| halted(round, e))?;
            forfeited.push((id, face_down.len()));
            self.spoils.extend(face_down);
            player.play_card(rng, events).map_err(|e| halted(round, e))?;
        }

        self.absorb_eliminations();
        self.absorb_plays()?;
        if !self.has_yet_to_play.is_empty() {
            return Err(halted(round, "a tied player did not play a face-up card"));
        }
        Ok(WarOutcome::Continue(forfeited))
    }

    /// Deal uncollected spoils round-robin to the remaining active players.
    fn return_spoils(&mut self, players: &mut [Player]) {
        let recipients: Vec<PlayerId> = players.iter().filter(|p| p.is_active()).map(Player::id).collect();
        if recipients.is_empty() {
            warn!(round = self.round, cards = self.spoils.len(), "no player left to take the spoils");
            return;
        }

        info!(round = self.round, cards = self.spoils.len(), "spoils returned to the table");
        for (i, card) in self.spoils.drain(..).enumerate() {
            let id = recipients[i % recipients.len()];
            players[id.index()].pick_up_cards(std::iter::once(card));
        }
    }

    /// Record every pending play. A play nobody was waiting for still
    /// left its owner's pile, so its card is kept at stake and the round
    /// halts once the whole inbox has been recorded.
    fn absorb_plays(&mut self) -> Result<()> {
        let mut unexpected = Vec::new();
        for CardPlayed { player, card } in self.plays.drain() {
            if !self.has_yet_to_play.remove(player) {
                warn!(round = self.round, %player, %card, "unexpected play kept in the spoils");
                self.spoils.push(card);
                unexpected.push(player);
                continue;
            }
            debug!(round = self.round, %player, %card, "play recorded");
            self.cards_played.record(player, card);
        }

        match unexpected.as_slice() {
            [] => Ok(()),
            [player, ..] => Err(halted(
                self.round,
                format!("unexpected play from {player} ({} in total)", unexpected.len()),
            )),
        }
    }

    fn absorb_eliminations(&mut self) {
        for PlayerEliminated { player } in self.eliminations.drain() {
            self.active_players.remove(player);
            self.has_yet_to_play.remove(player);
            if !self.eliminated.contains(&player) {
                self.eliminated.push(player);
            }
        }
    }
}

fn halted(round: u64, reason: impl std::fmt::Display) -> WarError {
    WarError::RoundHalted {
        round,
        reason: reason.to_string(),
    }
}
