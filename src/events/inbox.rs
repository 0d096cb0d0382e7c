//! Message inbox for the single owner of game state.
//!
//! Callbacks cannot borrow the game that owns the players publishing to
//! them. Instead the round engine subscribes a sink that pushes each event
//! onto this inbox's queue, and drains it whenever it regains control.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub struct Inbox<E> {
    queue: Rc<RefCell<VecDeque<E>>>,
}

impl<E: Clone + 'static> Inbox<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// A callback that queues every event it receives in this inbox.
    pub fn sink(&self) -> impl FnMut(&E) + 'static {
        let queue = Rc::clone(&self.queue);
        move |event: &E| queue.borrow_mut().push_back(event.clone())
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.queue.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl<E: Clone + 'static> Default for Inbox<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Inbox<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inbox")
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}
