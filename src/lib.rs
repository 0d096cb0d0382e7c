//! # war-engine
//!
//! The card game War for two to thirteen players.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Rounds, wars and dealing work the same for any
//!    table size from 2 to 13. Nothing assumes two players.
//!
//! 2. **Single Owner**: A [`Game`] owns its players, RNG and event
//!    dispatchers. Plays travel from players to the round engine as
//!    messages, never through shared mutable state.
//!
//! 3. **Engine / Presentation Boundary**: Presentation code calls
//!    [`Game::play_card`] and observes the table through events,
//!    [`RoundReport`]s and [`GameSnapshot`]s. The engine never renders.
//!
//! ## Architecture
//!
//! - **Round state machine**: `AwaitingPlays → Evaluating →
//!   (WarInProgress → Evaluating)* → SpoilsCollected`.
//!
//! - **Deterministic**: every random decision comes from one seeded
//!   [`GameRng`], so a seed reproduces a whole game.
//!
//! - **Persistent piles**: `im::Vector` piles make snapshots cheap.
//!
//! ## Modules
//!
//! - `core`: player ids, RNG, configuration, errors
//! - `cards`: ranks, suits, cards and the deck
//! - `zones`: draw and discard piles
//! - `events`: per-player play and elimination channels
//! - `players`: player state and card submission
//! - `rules`: round evaluation and war resolution
//! - `game`: setup, dealing, turn order and round driving

pub mod cards;
pub mod core;
pub mod events;
pub mod game;
pub mod players;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, PlayerId, PlayerSet, Result, WarError, MAX_PLAYERS, MIN_PLAYERS};

pub use crate::cards::{build_deck, shuffle, Card, CardColor, Deck, Rank, Suit, DECK_SIZE};

pub use crate::zones::{Pile, PilePosition};

pub use crate::events::{CardPlayed, Channel, Dispatchers, PlayerEliminated, SubscriptionId};

pub use crate::players::Player;

pub use crate::rules::{evaluate, CardsPlayed, Evaluation, GameResult, RoundEngine, RoundPhase, RoundReport, RoundStep};

pub use crate::game::{
    parse_player_count, Game, GameSnapshot, GameStatus, PlayerSetup, PlayerView, Scheduler, SetupRequest,
};
