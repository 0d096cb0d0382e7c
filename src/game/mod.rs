//! Running a game of War.
//!
//! ## Key Types
//!
//! - `Game`: owns the roster, deals the deck and drives rounds
//! - `SetupRequest` / `PlayerSetup`: validated table configuration
//! - `GameSnapshot`: serialisable view of the table for presentation code
//! - `Scheduler`: logical-time delays for offering plays

pub mod controller;
pub mod schedule;
pub mod setup;
pub mod snapshot;

pub use controller::{Game, GameStatus};
pub use schedule::Scheduler;
pub use setup::{default_name, parse_player_count, PlayerSetup, SetupRequest};
pub use snapshot::{GameSnapshot, PlayerView};
