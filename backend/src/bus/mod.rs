//! In-process publish/subscribe channel
//!
//! Decouples the simulation engine from its consumers. Events are a
//! closed set of tagged variants, so an unknown event name is
//! unrepresentable rather than a runtime error.
//!
//! See `dispatcher.rs` for the bus and `events.rs` for the event types
//! and recording log.

pub mod dispatcher;
pub mod events;

pub use dispatcher::{EventBus, SubscriptionId};
pub use events::{CallEvent, EventKind, EventLog};
