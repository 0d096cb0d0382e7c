//! Round resolution.
//!
//! - [`evaluate()`]: pure scoring of one set of face-up cards
//! - [`RoundEngine`]: the per-round state machine (collect plays, evaluate,
//!   run wars, hand out spoils)
//! - [`RoundReport`]: what happened in a resolved round
//! - [`GameResult`]: how a game ended

pub mod engine;
pub mod evaluate;
pub mod round;

pub use engine::{GameResult, RoundEngine, RoundPhase};
pub use evaluate::{evaluate, Evaluation};
pub use round::{CardsPlayed, RoundReport, RoundStep};
