//! Read-only views of a game for presentation code.

use serde::{Deserialize, Serialize};

use super::controller::GameStatus;
use crate::cards::Card;
use crate::core::PlayerId;
use crate::rules::RoundPhase;

/// What the table shows for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub human: bool,
    pub draw_count: usize,
    pub discard_count: usize,
    pub active: bool,
    pub can_play: bool,
    /// The play affordance has been offered this round.
    pub play_offered: bool,
    /// Face-up card of the current step, if any.
    pub on_table: Option<Card>,
}

/// The whole table at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub round: u64,
    pub phase: RoundPhase,
    pub whose_turn: Option<PlayerId>,
    /// Logical clock, in milliseconds.
    pub now_ms: u64,
    /// Cards at stake that nobody has collected.
    pub spoils: usize,
    pub players: Vec<PlayerView>,
}

impl GameSnapshot {
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.players
            .iter()
            .map(|p| p.draw_count + p.discard_count + usize::from(p.on_table.is_some()))
            .sum::<usize>()
            + self.spoils
    }
}
