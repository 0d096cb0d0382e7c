//! Subscription storage and synchronous delivery.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::event::{CardPlayed, PlayerEliminated};

/// Handle returned by [`Channel::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// A single event channel keyed by player.
pub struct Channel<E> {
    subscribers: FxHashMap<PlayerId, Vec<(SubscriptionId, Callback<E>)>>,
    next_id: u32,
}

impl<E> Channel<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Register `callback` for events published for `player`.
    pub fn subscribe(&mut self, player: PlayerId, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(player)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for callbacks in self.subscribers.values_mut() {
            if let Some(pos) = callbacks.iter().position(|(sub, _)| *sub == id) {
                callbacks.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every callback registered for `player`, in
    /// registration order. Returns the number of callbacks invoked.
    pub fn publish(&mut self, player: PlayerId, event: &E) -> usize {
        let Some(callbacks) = self.subscribers.get_mut(&player) else {
            return 0;
        };
        for (_, callback) in callbacks.iter_mut() {
            callback(event);
        }
        callbacks.len()
    }

    #[must_use]
    pub fn subscriber_count(&self, player: PlayerId) -> usize {
        self.subscribers.get(&player).map_or(0, Vec::len)
    }
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.subscribers.values().map(Vec::len).sum();
        f.debug_struct("Channel")
            .field("players", &self.subscribers.len())
            .field("subscriptions", &total)
            .finish()
    }
}

/// The two channels a game publishes on.
#[derive(Debug, Default)]
pub struct Dispatchers {
    pub played: Channel<CardPlayed>,
    pub eliminated: Channel<PlayerEliminated>,
}

impl Dispatchers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
