//! Call Simulator Core - Rust Engine
//!
//! Replays a recorded sales call on a timed schedule, maintains derived
//! live metrics, and surfaces keyword-triggered coaching cards.
//!
//! # Architecture
//!
//! - **core**: Clock abstraction and repeating-timer scheduling
//! - **models**: Domain types (Transcript, CallSession, BaselineMetrics)
//! - **triggers**: Keyword to coaching-card catalog
//! - **bus**: In-process publish/subscribe channel and event log
//! - **engine**: Playback state machine and tick loop
//! - **projector**: Live-or-static metric projection and trend window
//!
//! # Critical Invariants
//!
//! 1. All state mutation happens on one cooperative timeline (commands
//!    and `poll`-driven timer callbacks); there is no parallel mutation
//! 2. `pause`/`stop` cancel outstanding timers before returning, so a
//!    stale firing never mutates state after a transition
//! 3. A coaching card surfaces at most once per call
//! 4. Time is injected via `Clock`; tests drive a manual clock

// Module declarations
pub mod bus;
pub mod core;
pub mod engine;
pub mod models;
pub mod projector;
pub mod triggers;

// Re-exports for convenience
pub use bus::{CallEvent, EventBus, EventKind, EventLog, SubscriptionId};
pub use crate::core::clock::{format_mm_ss, Clock, ManualClock, SystemClock};
pub use crate::core::timer::{TimerId, TimerWheel};
pub use engine::{CallSimulator, Phase, SimulationError, SimulationState, SimulatorConfig};
pub use models::{
    metrics::{
        format_score, BaselineMetrics, EngagementStats, FillerWordStats, SentimentLabel,
        SentimentSummary, SpeakingPace, TalkListenRatio,
    },
    session::CallSession,
    transcript::{SpeakerRole, TranscriptEntry, TranscriptError, TranscriptStore},
};
pub use projector::{MetricsProjector, SentimentTrend, TrendPoint};
pub use triggers::{TriggerCatalog, TriggerCategory, TriggerDefinition};
