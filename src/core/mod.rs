//! Core engine types: player identifiers, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by every other module.
//! Nothing in here knows about rounds or wars.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{Result, WarError};
pub use player::{PlayerId, PlayerSet, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::GameRng;
