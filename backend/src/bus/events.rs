//! Engine event types and recording log
//!
//! Every significant engine transition is published as a `CallEvent`.
//! The log is a recording subscriber in the same spirit: consumers that
//! want history attach one and query it afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::dispatcher::{EventBus, SubscriptionId};
use crate::models::transcript::TranscriptEntry;
use crate::triggers::TriggerDefinition;

/// An event published by the simulation engine.
///
/// Payload-carrying variants clone their payload per publish; entries
/// and definitions are small value types.
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    /// A simulated call began
    CallStarted,

    /// The running call was paused
    CallPaused,

    /// The call ended (operator stop or transcript exhausted)
    CallEnded,

    /// A transcript turn was emitted
    TranscriptUpdated(TranscriptEntry),

    /// The live sentiment reading changed
    SentimentChanged(f64),

    /// A coaching card surfaced for the first time this call
    RtaCardTriggered(TriggerDefinition),
}

/// Discriminant of a `CallEvent`, used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CallStarted,
    CallPaused,
    CallEnded,
    TranscriptUpdated,
    SentimentChanged,
    RtaCardTriggered,
}

impl CallEvent {
    /// The event's discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            CallEvent::CallStarted => EventKind::CallStarted,
            CallEvent::CallPaused => EventKind::CallPaused,
            CallEvent::CallEnded => EventKind::CallEnded,
            CallEvent::TranscriptUpdated(_) => EventKind::TranscriptUpdated,
            CallEvent::SentimentChanged(_) => EventKind::SentimentChanged,
            CallEvent::RtaCardTriggered(_) => EventKind::RtaCardTriggered,
        }
    }

    /// Kebab-case event name, as consumers display it.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl EventKind {
    /// Kebab-case event name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::CallStarted => "call-started",
            EventKind::CallPaused => "call-paused",
            EventKind::CallEnded => "call-ended",
            EventKind::TranscriptUpdated => "transcript-updated",
            EventKind::SentimentChanged => "sentiment-changed",
            EventKind::RtaCardTriggered => "rta-card-triggered",
        }
    }
}

/// Ordered record of published events.
///
/// A simple wrapper around `Vec<CallEvent>` with query helpers. Attach
/// one to a bus with [`EventLog::attach`] to capture everything an
/// engine publishes.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CallEvent>,
}

impl EventLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn log(&mut self, event: CallEvent) {
        self.events.push(event);
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All recorded events, publish order.
    pub fn events(&self) -> &[CallEvent] {
        &self.events
    }

    /// Events of one kind, publish order.
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&CallEvent> {
        self.events.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Count of events of one kind.
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Discard all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Subscribe a shared log to every event on `bus`.
    ///
    /// Returns the subscription handle and the shared log. The log is
    /// read through the `Rc` after (or during) a replay.
    pub fn attach(bus: &mut EventBus) -> (SubscriptionId, Rc<RefCell<EventLog>>) {
        let log = Rc::new(RefCell::new(EventLog::new()));
        let sink = Rc::clone(&log);
        let id = bus.subscribe_all(move |event: &CallEvent| {
            sink.borrow_mut().log(event.clone());
        });
        (id, log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_kebab_case() {
        assert_eq!(CallEvent::CallStarted.name(), "call-started");
        assert_eq!(CallEvent::SentimentChanged(0.5).name(), "sentiment-changed");
        assert_eq!(EventKind::RtaCardTriggered.name(), "rta-card-triggered");
    }

    #[test]
    fn log_counts_by_kind() {
        let mut log = EventLog::new();
        log.log(CallEvent::CallStarted);
        log.log(CallEvent::SentimentChanged(0.8));
        log.log(CallEvent::SentimentChanged(-0.3));
        log.log(CallEvent::CallEnded);

        assert_eq!(log.len(), 4);
        assert_eq!(log.count_of(EventKind::SentimentChanged), 2);
        assert_eq!(log.count_of(EventKind::CallPaused), 0);
        assert_eq!(log.events_of_kind(EventKind::CallEnded).len(), 1);
    }

    #[test]
    fn log_clear() {
        let mut log = EventLog::new();
        log.log(CallEvent::CallStarted);
        log.clear();

        assert!(log.is_empty());
    }
}
