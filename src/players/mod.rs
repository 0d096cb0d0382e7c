//! Table participants.
//!
//! A [`Player`] owns a draw pile and a discard pile, knows whether it may
//! still play this round, and submits cards either face up (published on
//! the play channel) or face down during a war (returned to the caller).

mod player;

pub use player::Player;
