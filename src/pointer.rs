//! Process-wide pointer feed.
//!
//! Drag gestures keep going when the pointer leaves the drawing surface, so
//! pointer movement is observed window-wide rather than on the surface. The
//! host publishes every global pointer sample here; each drawing surface
//! subscribes for its lifetime and unsubscribes when it goes away.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use crate::coords::Point;
use crate::input::Modifiers;

/// A global pointer sample in the page frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub page: Point,
    pub modifiers: Modifiers,
}

/// Handle returned by [`PointerFeed::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&PointerSample)>;

/// Fan-out of global pointer samples to subscribed listeners.
#[derive(Default)]
pub struct PointerFeed {
    next_id: u64,
    listeners: Vec<(Subscription, Listener)>,
    last: Option<PointerSample>,
}

impl PointerFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It is not replayed the last sample.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PointerSample) + 'static,
    {
        let sub = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((sub, Box::new(listener)));
        sub
    }

    /// Drop a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != sub);
        self.listeners.len() != before
    }

    /// Deliver a sample to every listener in subscription order.
    pub fn publish(&mut self, sample: PointerSample) {
        self.last = Some(sample);
        for (_, listener) in &mut self.listeners {
            listener(&sample);
        }
    }

    /// The most recently published sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<PointerSample> {
        self.last
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}
