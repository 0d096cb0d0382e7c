//! Card piles.
//!
//! Every card a player owns sits in one of their two piles: the draw pile
//! they play from and the discard pile their winnings accumulate in.
//!
//! ## Key Types
//!
//! - `Pile`: ordered cards; the last card is the top of the pile
//! - `PilePosition`: where to insert cards into a pile

pub mod pile;

pub use pile::{Pile, PilePosition};
