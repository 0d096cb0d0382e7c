//! Error taxonomy.
//!
//! Setup errors (`InvalidPlayerCount`, `DuplicatePlayerName`,
//! `InvalidConfig`) are returned to whoever is collecting setup input and
//! prevent a game from starting. `Inactive` is local to a single play call.
//! `RoundHalted` stops a round from progressing without ending the game.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarError {
    #[error("{name} is no longer playing")]
    Inactive { name: String },

    #[error("{input:?} is an invalid number of players. Choose a number from 2 to 13.")]
    InvalidPlayerCount { input: String },

    #[error("the name {name:?} is used by more than one player")]
    DuplicatePlayerName { name: String },

    #[error("player index {index} is out of range (roster has {len} players)")]
    UnknownPlayer { index: usize, len: usize },

    #[error("invalid configuration: {desc}")]
    InvalidConfig { desc: String },

    #[error("the game has not started")]
    GameNotStarted,

    #[error("the game is already over")]
    GameOver,

    #[error("round {round} halted: {reason}")]
    RoundHalted { round: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, WarError>;
