//! Collecting and validating a table before the game starts.

use serde::{Deserialize, Serialize};

use crate::core::{Result, WarError, MAX_PLAYERS, MIN_PLAYERS};

/// Parse a player count typed by a user.
///
/// Surrounding whitespace is ignored. Anything that is not a whole number
/// from 2 to 13 is rejected with [`WarError::InvalidPlayerCount`].
///
/// ```
/// use war_engine::game::parse_player_count;
///
/// assert_eq!(parse_player_count(" 4 ").unwrap(), 4);
/// assert!(parse_player_count("3.7").is_err());
/// assert!(parse_player_count("14").is_err());
/// ```
pub fn parse_player_count(input: &str) -> Result<usize> {
    match input.trim().parse::<usize>() {
        Ok(count) if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) => Ok(count),
        _ => Err(WarError::InvalidPlayerCount {
            input: input.to_string(),
        }),
    }
}

/// Name shown for the player at `index` when none was given.
#[must_use]
pub fn default_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

/// One seat at the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Display name. Blank names fall back to `"Player N"`.
    pub name: String,
    /// Whether a person plays this seat. The engine treats everyone alike.
    pub human: bool,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            human: false,
        }
    }

    #[must_use]
    pub fn with_human(mut self, human: bool) -> Self {
        self.human = human;
        self
    }
}

/// Everything needed to seat a table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupRequest {
    pub players: Vec<PlayerSetup>,
}

impl SetupRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` unnamed, non-human seats.
    pub fn with_default_players(count: usize) -> Result<Self> {
        let request = Self {
            players: vec![PlayerSetup::default(); count],
        };
        request.validate()?;
        Ok(request)
    }

    /// Add a seat (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerSetup) -> Self {
        self.players.push(player);
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Names after defaulting blank entries, in seat order.
    #[must_use]
    pub fn resolved_names(&self) -> Vec<String> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| match p.name.trim() {
                "" => default_name(i),
                name => name.to_string(),
            })
            .collect()
    }

    /// Check the seat count and that every resolved name is unique.
    pub fn validate(&self) -> Result<()> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(WarError::InvalidPlayerCount {
                input: count.to_string(),
            });
        }

        let names = self.resolved_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(WarError::DuplicatePlayerName { name: name.clone() });
            }
        }
        Ok(())
    }
}
