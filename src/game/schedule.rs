//! Logical-time scheduling of delayed work.
//!
//! The clock only moves when the owner calls [`Scheduler::advance`], which
//! keeps delays deterministic and testable.

#[derive(Clone, Debug)]
struct Scheduled<T> {
    due: u64,
    seq: u64,
    item: T,
}

/// Items due at logical millisecond timestamps.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current logical time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Schedule `item` to become due `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, item: T) {
        let due = self.now.saturating_add(delay_ms);
        self.pending.push(Scheduled {
            due,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    /// Move the clock forward and return everything now due, earliest
    /// first. Items due at the same time come out in scheduling order.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        self.now = self.now.saturating_add(ms);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|s| s.due <= now);
        self.pending = waiting;

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.item).collect()
    }

    /// Drop every pending item.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_early() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(100, 'a');
        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.advance(1), vec!['a']);
        assert_eq!(scheduler.now(), 100);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(50, 3);
        scheduler.schedule_in(10, 1);
        scheduler.schedule_in(50, 4);
        scheduler.schedule_in(20, 2);

        assert_eq!(scheduler.advance(1000), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(5, ());
        scheduler.clear();
        assert!(scheduler.advance(10).is_empty());
    }
}
