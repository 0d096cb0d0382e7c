//! Game configuration.
//!
//! `GameConfig` holds the tunable parameters of a table. Defaults reproduce
//! the house rules: wars are fought with up to four cards and the play
//! affordance is re-offered 100 ms after a round starts.

use serde::{Deserialize, Serialize};

use super::error::{Result, WarError};

/// Cap on the number of cards a war asks of each tied player.
pub const DEFAULT_WAR_CARDS: usize = 4;

/// Delay before a player is offered their next play, in milliseconds.
pub const DEFAULT_PLAY_DEBOUNCE_MS: u64 = 100;

/// Round cap used by auto-play drivers.
pub const DEFAULT_MAX_ROUNDS: u64 = 100_000;

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Random seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Upper bound for the war card threshold.
    /// A tied player with fewer cards lowers the threshold for everyone.
    pub war_cards: usize,

    /// Logical delay between a round starting and each player's play
    /// being offered to the presentation layer.
    pub play_debounce_ms: u64,

    /// Round cap for `Game::play_until_complete`.
    pub max_rounds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            war_cards: DEFAULT_WAR_CARDS,
            play_debounce_ms: DEFAULT_PLAY_DEBOUNCE_MS,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Set a fixed seed for reproducible games.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_war_cards(mut self, war_cards: usize) -> Self {
        self.war_cards = war_cards;
        self
    }

    #[must_use]
    pub fn with_play_debounce_ms(mut self, delay: u64) -> Self {
        self.play_debounce_ms = delay;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Check the configuration before a game is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.war_cards == 0 {
            return Err(WarError::InvalidConfig {
                desc: String::from("war_cards must be at least 1"),
            });
        }
        if self.max_rounds == 0 {
            return Err(WarError::InvalidConfig {
                desc: String::from("max_rounds must be at least 1"),
            });
        }
        Ok(())
    }
}
