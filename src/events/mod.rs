//! Per-player event dispatch.
//!
//! Two narrow channels carry everything the engine announces:
//!
//! - **played**: a player put a card face up ([`CardPlayed`])
//! - **eliminated**: a player ran out of cards ([`PlayerEliminated`])
//!
//! Subscriptions are keyed by player. Delivery is synchronous and in
//! registration order. Each game owns its own [`Dispatchers`]; there is no
//! process-wide dispatcher, so any number of games can coexist.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use war_engine::cards::{Card, Rank, Suit};
//! use war_engine::core::PlayerId;
//! use war_engine::events::{CardPlayed, Dispatchers};
//!
//! let mut events = Dispatchers::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! events.played.subscribe(PlayerId::new(0), move |e: &CardPlayed| sink.borrow_mut().push(e.card));
//!
//! let card = Card::new(Rank::Ace, Suit::Hearts);
//! events.played.publish(PlayerId::new(0), &CardPlayed { player: PlayerId::new(0), card });
//! events.played.publish(PlayerId::new(1), &CardPlayed { player: PlayerId::new(1), card });
//!
//! assert_eq!(*seen.borrow(), vec![card]);
//! ```

mod dispatcher;
mod event;
mod inbox;

pub use dispatcher::{Channel, Dispatchers, SubscriptionId};
pub use event::{CardPlayed, PlayerEliminated};
pub use inbox::Inbox;
