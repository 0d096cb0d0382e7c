//! The game controller: roster, dealing, turn order and round driving.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::schedule::Scheduler;
use super::setup::SetupRequest;
use super::snapshot::{GameSnapshot, PlayerView};
use crate::cards::{build_deck, Card};
use crate::core::{GameConfig, GameRng, PlayerId, PlayerSet, Result, WarError};
use crate::events::{CardPlayed, Dispatchers, PlayerEliminated, SubscriptionId};
use crate::players::Player;
use crate::rules::{GameResult, RoundEngine, RoundPhase, RoundReport};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Over(GameResult),
}

/// A game of War.
///
/// Owns the players, the RNG, the event dispatchers and the round engine.
/// Presentation code drives it with [`Game::play_card`] (or the auto-play
/// helpers) and observes it through events, round reports and
/// [`Game::snapshot`].
///
/// ```
/// use war_engine::core::GameConfig;
/// use war_engine::game::{Game, SetupRequest};
///
/// let setup = SetupRequest::with_default_players(3).unwrap();
/// let mut game = Game::new(&setup, GameConfig::default().with_seed(11)).unwrap();
/// game.start().unwrap();
///
/// let result = game.play_until_complete().unwrap();
/// assert!(result.is_some());
/// assert_eq!(game.cards_in_play(), game.dealt_cards());
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    players: Vec<Player>,
    events: Dispatchers,
    engine: RoundEngine,
    scheduler: Scheduler<PlayerId>,
    offered: PlayerSet,
    whose_turn: Option<PlayerId>,
    game_started: bool,
    result: Option<GameResult>,
    dealt: usize,
    last_report: Option<RoundReport>,
}

impl Game {
    /// Seat a table. Validates the setup and the configuration; the game
    /// does not start until [`Game::start`].
    pub fn new(setup: &SetupRequest, config: GameConfig) -> Result<Self> {
        setup.validate()?;
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let players: Vec<Player> = setup
            .resolved_names()
            .into_iter()
            .zip(&setup.players)
            .enumerate()
            .map(|(i, (name, seat))| Player::new(PlayerId::new(i as u8), name).with_human(seat.human))
            .collect();

        let mut events = Dispatchers::new();
        let engine = RoundEngine::new(config.war_cards);
        for player in &players {
            engine.watch(player.id(), &mut events);
        }

        info!(players = players.len(), seed = rng.seed(), "table seated");

        Ok(Self {
            config,
            rng,
            players,
            events,
            engine,
            scheduler: Scheduler::new(),
            offered: PlayerSet::new(),
            whose_turn: None,
            game_started: false,
            result: None,
            dealt: 0,
            last_report: None,
        })
    }

    /// Seat a table with fixed draw piles instead of a dealt deck, and
    /// start it. The last card of each hand is played first.
    pub fn with_hands(setup: &SetupRequest, hands: Vec<Vec<Card>>, config: GameConfig) -> Result<Self> {
        let mut game = Self::new(setup, config)?;
        if hands.len() != game.players.len() {
            return Err(WarError::InvalidConfig {
                desc: format!("{} hands for {} players", hands.len(), game.players.len()),
            });
        }

        for (player, hand) in game.players.iter_mut().zip(hands) {
            game.dealt += hand.len();
            *player = Player::with_piles(player.id(), player.name(), hand, Vec::new()).with_human(player.is_human());
        }

        game.whose_turn = Some(PlayerId::new(0));
        game.game_started = true;
        game.begin_round();
        Ok(game)
    }

    /// Shuffle and deal a fresh deck, then open the first round.
    pub fn start(&mut self) -> Result<()> {
        if self.result.is_some() {
            return Err(WarError::GameOver);
        }
        if self.game_started {
            return Ok(());
        }

        let dealer = self.rng.gen_index(self.players.len());
        self.whose_turn = Some(PlayerId::new(dealer as u8));

        let mut deck = build_deck();
        deck.shuffle(&mut self.rng);
        self.deal_deck(deck.into_cards());
        self.game_started = true;

        info!(dealt = self.dealt, first = dealer, "game started");
        self.begin_round();
        Ok(())
    }

    /// Deal round-robin from `whose_turn`, stopping once every draw pile
    /// is equal and fewer cards remain than players.
    fn deal_deck(&mut self, cards: Vec<Card>) {
        let total = cards.len();
        for (i, card) in cards.into_iter().enumerate() {
            if self.draw_piles_equal() && total - i < self.players.len() {
                debug!(undealt = total - i, "extra cards left out");
                break;
            }
            let Some(turn) = self.whose_turn else {
                break;
            };
            self.players[turn.index()].deal(card);
            self.dealt += 1;
            self.next_player();
        }
    }

    fn draw_piles_equal(&self) -> bool {
        let mut sizes = self.players.iter().map(|p| p.draw_pile().len());
        let first = sizes.next();
        sizes.all(|size| Some(size) == first)
    }

    /// Pass the turn to the next player in seat order.
    ///
    /// Once the game has started, inactive players are skipped. If nobody
    /// else is active the turn stays put.
    pub fn next_player(&mut self) -> Option<PlayerId> {
        let current = self.whose_turn?;
        let n = self.players.len();
        let next = (1..=n)
            .map(|step| (current.index() + step) % n)
            .find(|&i| !self.game_started || self.players[i].is_active())
            .map_or(current, |i| PlayerId::new(i as u8));
        self.whose_turn = Some(next);
        Some(next)
    }

    /// Play `player`'s top card.
    ///
    /// A second call in the same round is a no-op. Returns the round
    /// report once this play completes the round.
    pub fn play_card(&mut self, player: PlayerId) -> Result<Option<RoundReport>> {
        self.ensure_running()?;
        let index = self.index_of(player)?;
        self.players[index].play_card(&mut self.rng, &mut self.events)?;
        self.offered.remove(player);
        self.collect()
    }

    /// Play for every player who still owes a card this round.
    pub fn play_round(&mut self) -> Result<RoundReport> {
        self.ensure_running()?;
        if let Some(report) = self.collect()? {
            return Ok(report);
        }

        let awaiting: Vec<PlayerId> = self.engine.has_yet_to_play().iter().collect();
        for player in awaiting {
            if let Some(report) = self.play_card(player)? {
                return Ok(report);
            }
        }

        Err(WarError::RoundHalted {
            round: self.engine.round(),
            reason: "every player played but the round did not resolve".into(),
        })
    }

    /// Auto-play rounds until the game ends or `GameConfig::max_rounds`
    /// rounds have been played by this call. Starts the game if needed.
    /// Returns `None` when the cap was reached first.
    pub fn play_until_complete(&mut self) -> Result<Option<GameResult>> {
        if !self.game_started && self.result.is_none() {
            self.start()?;
        }
        for _ in 0..self.config.max_rounds {
            if self.result.is_some() {
                break;
            }
            self.play_round()?;
        }
        Ok(self.result)
    }

    /// Advance the logical clock by `ms` milliseconds. Returns the players
    /// whose play affordance became available.
    pub fn advance_clock(&mut self, ms: u64) -> Vec<PlayerId> {
        let mut offered = Vec::new();
        for player in self.scheduler.advance(ms) {
            if self.result.is_none() && self.engine.has_yet_to_play().contains(player) {
                self.offered.insert(player);
                offered.push(player);
            }
        }
        offered
    }

    #[must_use]
    pub fn is_play_offered(&self, player: PlayerId) -> bool {
        self.offered.contains(player)
    }

    /// Observe `player`'s face-up plays.
    pub fn subscribe_played(&mut self, player: PlayerId, callback: impl FnMut(&CardPlayed) + 'static) -> SubscriptionId {
        self.events.played.subscribe(player, callback)
    }

    /// Observe `player`'s elimination.
    pub fn subscribe_eliminated(
        &mut self,
        player: PlayerId,
        callback: impl FnMut(&PlayerEliminated) + 'static,
    ) -> SubscriptionId {
        self.events.eliminated.subscribe(player, callback)
    }

    pub fn unsubscribe_played(&mut self, id: SubscriptionId) -> bool {
        self.events.played.unsubscribe(id)
    }

    pub fn unsubscribe_eliminated(&mut self, id: SubscriptionId) -> bool {
        self.events.eliminated.unsubscribe(id)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> Result<&Player> {
        self.index_of(player).map(|i| &self.players[i])
    }

    #[must_use]
    pub fn whose_turn(&self) -> Option<PlayerId> {
        self.whose_turn
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.game_started
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.result {
            Some(result) => GameStatus::Over(result),
            None if self.game_started => GameStatus::InProgress,
            None => GameStatus::NotStarted,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.engine.round()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.engine.phase()
    }

    #[must_use]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }

    /// Cards dealt at the start. Undealt leftovers are not counted.
    #[must_use]
    pub fn dealt_cards(&self) -> usize {
        self.dealt
    }

    /// Cards in piles, on the table and at stake.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        let piles: usize = self.players.iter().map(Player::card_count).sum();
        piles + self.cards_on_table() + self.engine.spoils().len()
    }

    fn cards_on_table(&self) -> usize {
        if self.engine.phase() == RoundPhase::AwaitingPlays {
            self.engine.cards_played().len()
        } else {
            0
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let awaiting = self.engine.phase() == RoundPhase::AwaitingPlays;
        let players = self
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id(),
                name: p.name().to_string(),
                human: p.is_human(),
                draw_count: p.draw_pile().len(),
                discard_count: p.discard_pile().len(),
                active: p.is_active(),
                can_play: p.is_active() && p.can_play_this_round(),
                play_offered: self.offered.contains(p.id()),
                on_table: if awaiting { self.engine.cards_played().get(p.id()) } else { None },
            })
            .collect();

        GameSnapshot {
            status: self.status(),
            round: self.engine.round(),
            phase: self.engine.phase(),
            whose_turn: self.whose_turn,
            now_ms: self.scheduler.now(),
            spoils: self.engine.spoils().len(),
            players,
        }
    }

    // === Internals ===

    fn ensure_running(&self) -> Result<()> {
        if self.result.is_some() {
            return Err(WarError::GameOver);
        }
        if !self.game_started {
            return Err(WarError::GameNotStarted);
        }
        Ok(())
    }

    fn index_of(&self, player: PlayerId) -> Result<usize> {
        let index = player.index();
        if index < self.players.len() {
            Ok(index)
        } else {
            Err(WarError::UnknownPlayer {
                index,
                len: self.players.len(),
            })
        }
    }

    fn collect(&mut self) -> Result<Option<RoundReport>> {
        let report = self
            .engine
            .collect_plays(&mut self.players, &mut self.rng, &mut self.events)?;
        Ok(report.map(|report| self.finish_round(report)))
    }

    fn finish_round(&mut self, report: RoundReport) -> RoundReport {
        debug_assert_eq!(self.cards_in_play(), self.dealt, "cards were lost in round {}", report.round);

        self.next_player();
        self.last_report = Some(report.clone());
        if !self.check_game_over() {
            self.begin_round();
        }
        report
    }

    fn begin_round(&mut self) {
        self.engine.start_round(&mut self.players, &mut self.events);
        self.scheduler.clear();
        self.offered.clear();
        if self.check_game_over() {
            return;
        }
        for player in self.engine.active_players().iter() {
            self.scheduler.schedule_in(self.config.play_debounce_ms, player);
        }
    }

    fn check_game_over(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        let mut active = self.players.iter().filter(|p| p.is_active()).map(Player::id);
        let result = match (active.next(), active.next()) {
            (Some(_), Some(_)) => return false,
            (Some(winner), None) => GameResult::Winner(winner),
            (None, _) => GameResult::Draw,
        };

        match result {
            GameResult::Winner(winner) => {
                info!(winner = %self.players[winner.index()].name(), rounds = self.engine.round(), "game over");
            }
            GameResult::Draw => info!(rounds = self.engine.round(), "game over in a draw"),
        }
        self.result = Some(result);
        self.game_started = false;
        self.scheduler.clear();
        self.offered.clear();
        true
    }
}
