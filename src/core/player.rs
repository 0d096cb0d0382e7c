//! Player identification and small player sets.
//!
//! ## PlayerId
//!
//! Stable 0-based index of a participant within the game's roster.
//!
//! ## PlayerSet
//!
//! Sorted, duplicate-free set of player ids backed by a `SmallVec` sized
//! for the largest supported table, so per-round working sets
//! (`active_players`, `has_yet_to_play`, tied players) never allocate.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can be started with.
pub const MAX_PLAYERS: usize = 13;

/// Player identifier: the player's position in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a table of `player_count` players.
    ///
    /// ```
    /// use war_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Sorted set of player ids.
///
/// ```
/// use war_engine::core::{PlayerId, PlayerSet};
///
/// let mut set: PlayerSet = [PlayerId::new(2), PlayerId::new(0)].into_iter().collect();
/// assert!(set.insert(PlayerId::new(1)));
/// assert!(!set.insert(PlayerId::new(1)));
/// assert_eq!(set.first(), Some(PlayerId::new(0)));
/// assert!(set.remove(PlayerId::new(2)));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSet {
    ids: SmallVec<[PlayerId; MAX_PLAYERS]>,
}

impl PlayerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a player. Returns `false` if already present.
    pub fn insert(&mut self, player: PlayerId) -> bool {
        match self.ids.binary_search(&player) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, player);
                true
            }
        }
    }

    /// Remove a player. Returns `false` if not present.
    pub fn remove(&mut self, player: PlayerId) -> bool {
        match self.ids.binary_search(&player) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.ids.binary_search(&player).is_ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Lowest player id in the set.
    #[must_use]
    pub fn first(&self) -> Option<PlayerId> {
        self.ids.first().copied()
    }

    /// Iterate in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only the players matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(PlayerId) -> bool) {
        self.ids.retain(|p| keep(*p));
    }
}

impl FromIterator<PlayerId> for PlayerSet {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        let mut set = Self::new();
        for player in iter {
            set.insert(player);
        }
        set
    }
}
