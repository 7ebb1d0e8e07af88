//! Synchronous event dispatch
//!
//! Handlers run on the calling thread, in subscription order, during
//! `publish`. The bus requires exclusive access for both subscription
//! changes and dispatch, so the handler set observed by one publish is
//! exactly the set present when it began; a handler cannot reach back
//! into the bus mid-dispatch.

use uuid::Uuid;

use crate::bus::events::{CallEvent, EventKind};

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

struct Subscription {
    id: SubscriptionId,
    /// `None` subscribes to every event kind.
    filter: Option<EventKind>,
    handler: Box<dyn FnMut(&CallEvent)>,
}

/// In-process publish/subscribe channel for engine events.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use call_simulator_core_rs::bus::{CallEvent, EventBus, EventKind};
///
/// let mut bus = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// bus.subscribe(EventKind::SentimentChanged, move |event| {
///     if let CallEvent::SentimentChanged(score) = event {
///         sink.borrow_mut().push(*score);
///     }
/// });
///
/// bus.publish(&CallEvent::SentimentChanged(0.8));
/// bus.publish(&CallEvent::CallEnded);
///
/// assert_eq!(*seen.borrow(), vec![0.8]);
/// ```
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to one event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&CallEvent) + 'static,
    {
        self.push_subscription(Some(kind), Box::new(handler))
    }

    /// Subscribe a handler to every event kind.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CallEvent) + 'static,
    {
        self.push_subscription(None, Box::new(handler))
    }

    fn push_subscription(
        &mut self,
        filter: Option<EventKind>,
        handler: Box<dyn FnMut(&CallEvent)>,
    ) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.push(Subscription { id, filter, handler });
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    /// Invoke every matching handler synchronously, in subscription
    /// order, on the calling thread.
    pub fn publish(&mut self, event: &CallEvent) {
        let kind = event.kind();
        for sub in self.subscriptions.iter_mut() {
            if sub.filter.map_or(true, |f| f == kind) {
                (sub.handler)(event);
            }
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }
}

// Manual Debug implementation (handlers don't implement Debug)
impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriptions.len())
            .finish()
    }
}
