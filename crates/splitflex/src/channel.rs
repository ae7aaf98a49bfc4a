//! Callback fan-out with latest-value frame coalescing.
//!
//! A [`SnapshotChannel`] delivers values to every current subscriber in
//! subscription order. Values can be emitted immediately, or offered and held
//! until the next [`SnapshotChannel::flush`]; offering again before a flush
//! replaces the pending value ("latest wins").
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use splitflex::SnapshotChannel;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut channel = SnapshotChannel::new();
//! let sink = Rc::clone(&seen);
//! channel.subscribe(move |value: &u32| sink.borrow_mut().push(*value));
//!
//! channel.offer(1);
//! channel.offer(2);
//! assert_eq!(channel.flush(), Some(2));
//! assert_eq!(*seen.borrow(), vec![2]);
//! ```

use std::fmt;

/// Handle returned by [`SnapshotChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Subscriber<T> = Box<dyn FnMut(&T)>;

pub struct SnapshotChannel<T> {
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
    pending: Option<T>,
    /// Offers replaced before reaching a flush.
    coalesced: u64,
}

impl<T> Default for SnapshotChannel<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 1,
            pending: None,
            coalesced: 0,
        }
    }
}

impl<T> fmt::Debug for SnapshotChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotChannel")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.pending.is_some())
            .field("coalesced", &self.coalesced)
            .finish()
    }
}

impl<T> SnapshotChannel<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `value` to all subscribers now.
    pub fn emit(&mut self, value: &T) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(value);
        }
    }

    /// Hold `value` for the next flush, replacing any pending value.
    pub fn offer(&mut self, value: T) {
        if self.pending.replace(value).is_some() {
            self.coalesced += 1;
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Total offers dropped in favour of a later one.
    #[must_use]
    pub const fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Deliver the pending value, if any, and return it.
    pub fn flush(&mut self) -> Option<T> {
        let value = self.pending.take()?;
        self.emit(&value);
        Some(value)
    }
}
