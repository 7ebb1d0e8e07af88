//! Call Simulator Engine
//!
//! Replays a recorded transcript on a timed cadence and surfaces
//! coaching cards as keywords come up:
//!
//! ```text
//! For each turn tick while Running:
//! 1. Emit the next transcript turn (append to the displayed prefix)
//! 2. Update the live sentiment reading
//! 3. Match the turn text against the trigger catalog
//!    (each card surfaces at most once per call)
//! 4. Publish rta-card-triggered / transcript-updated / sentiment-changed
//! 5. Advance the cursor; complete the call when the transcript is done
//! ```
//!
//! A second, independent 1-second timer refreshes the elapsed-duration
//! display while the call runs. Both timers live on one cooperative
//! timeline: the host loop calls [`CallSimulator::poll`], and commands
//! (`start`/`pause`/`stop`) deterministically cancel outstanding timers
//! before returning, so a stale firing can never mutate state after a
//! transition.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use call_simulator_core_rs::engine::{CallSimulator, SimulatorConfig};
//! use call_simulator_core_rs::core::clock::SystemClock;
//!
//! let mut sim = CallSimulator::new(
//!     session,
//!     transcript,
//!     baseline,
//!     catalog,
//!     SimulatorConfig::default(),
//!     Rc::new(SystemClock::new()),
//! )?;
//!
//! sim.bus_mut().subscribe_all(|event| println!("{}", event.name()));
//! sim.start();
//! loop {
//!     sim.poll();
//! }
//! ```

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

use crate::bus::{CallEvent, EventBus};
use crate::core::clock::{format_mm_ss, Clock};
use crate::core::timer::{TimerId, TimerWheel};
use crate::models::metrics::BaselineMetrics;
use crate::models::session::CallSession;
use crate::models::transcript::{TranscriptEntry, TranscriptStore};
use crate::projector::MetricsProjector;
use crate::triggers::{TriggerCatalog, TriggerDefinition};

// ============================================================================
// Configuration
// ============================================================================

/// Timing configuration for one simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Simulated time between transcript turns
    pub turn_interval: Duration,

    /// Cadence of the elapsed-duration refresh
    pub duration_refresh_interval: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            turn_interval: Duration::from_millis(3000),
            duration_refresh_interval: Duration::from_millis(1000),
        }
    }
}

/// Simulator construction errors
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Transcript must contain at least one turn")]
    EmptyTranscript,
}

// ============================================================================
// Playback State
// ============================================================================

/// Phase of the playback state machine. `Idle` is initial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Ended,
}

/// The simulator's mutable playback state.
///
/// Exclusively owned by [`CallSimulator`]; consumers only ever see a
/// shared reference via [`CallSimulator::state`].
#[derive(Debug, Clone)]
pub struct SimulationState {
    phase: Phase,
    /// Index of the next turn to emit; `0 <= cursor <= transcript len`
    cursor: usize,
    /// Prefix of the transcript emitted so far, first turn pre-seeded
    displayed_entries: Vec<TranscriptEntry>,
    /// Sentiment of the last emitted turn, or the call baseline
    current_sentiment: f64,
    /// Clock reading at the start of the running call
    started_at: Option<Duration>,
    /// Zero-padded `mm:ss`, refreshed while Running, frozen otherwise
    elapsed_display: String,
    /// Ids of coaching cards surfaced this call, in activation order
    active_triggers: Vec<String>,
}

impl SimulationState {
    fn new(first_entry: TranscriptEntry, baseline_sentiment: f64) -> Self {
        Self {
            phase: Phase::Idle,
            cursor: 0,
            displayed_entries: vec![first_entry],
            current_sentiment: baseline_sentiment,
            started_at: None,
            elapsed_display: "00:00".to_string(),
            active_triggers: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Index of the next turn to emit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Turns emitted so far in the current call, transcript order.
    pub fn displayed_entries(&self) -> &[TranscriptEntry] {
        &self.displayed_entries
    }

    /// Sentiment of the last emitted turn, or the call baseline when
    /// nothing has been emitted this call.
    pub fn current_sentiment(&self) -> f64 {
        self.current_sentiment
    }

    /// Clock reading captured when the call entered Running.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Live `mm:ss` display; frozen whenever the call is not running.
    pub fn elapsed_display(&self) -> &str {
        &self.elapsed_display
    }

    /// Ids of coaching cards surfaced this call, activation order.
    pub fn active_triggers(&self) -> &[String] {
        &self.active_triggers
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Replays one recorded call and publishes engine events.
///
/// All mutation happens in command calls and `poll`-driven timer
/// callbacks on a single cooperative timeline. Commands issued from a
/// phase that does not permit them are ignored: they mutate nothing,
/// publish nothing, and return `false`.
pub struct CallSimulator {
    session: CallSession,
    transcript: TranscriptStore,
    catalog: TriggerCatalog,
    config: SimulatorConfig,

    /// Injected time source; tests substitute a manual clock
    clock: Rc<dyn Clock>,
    timers: TimerWheel,
    turn_timer: Option<TimerId>,
    duration_timer: Option<TimerId>,

    state: SimulationState,
    bus: EventBus,
    projector: MetricsProjector,

    /// Seed turn shown before and between calls
    first_entry: TranscriptEntry,
    /// Call-wide sentiment baseline
    baseline_sentiment: f64,
}

impl CallSimulator {
    /// Create a simulator over fixed call data.
    ///
    /// Fails if the transcript is empty, an interval is zero, or the
    /// catalog contains duplicate card ids.
    pub fn new(
        session: CallSession,
        transcript: TranscriptStore,
        baseline: BaselineMetrics,
        catalog: TriggerCatalog,
        config: SimulatorConfig,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, SimulationError> {
        Self::validate(&config, &transcript, &catalog)?;

        let first_entry = transcript
            .entry_at(0)
            .map_err(|_| SimulationError::EmptyTranscript)?
            .clone();
        let baseline_sentiment = baseline.sentiment.overall;
        let state = SimulationState::new(first_entry.clone(), baseline_sentiment);
        let projector = MetricsProjector::new(baseline, session.duration.clone());

        Ok(Self {
            session,
            transcript,
            catalog,
            config,
            clock,
            timers: TimerWheel::new(),
            turn_timer: None,
            duration_timer: None,
            state,
            bus: EventBus::new(),
            projector,
            first_entry,
            baseline_sentiment,
        })
    }

    fn validate(
        config: &SimulatorConfig,
        transcript: &TranscriptStore,
        catalog: &TriggerCatalog,
    ) -> Result<(), SimulationError> {
        if transcript.is_empty() {
            return Err(SimulationError::EmptyTranscript);
        }

        if config.turn_interval.is_zero() {
            return Err(SimulationError::InvalidConfig(
                "turn_interval must be positive".to_string(),
            ));
        }

        if config.duration_refresh_interval.is_zero() {
            return Err(SimulationError::InvalidConfig(
                "duration_refresh_interval must be positive".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for def in catalog.definitions() {
            if !ids.insert(&def.id) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate trigger id: {}",
                    def.id
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Read-only view of the playback state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Static call metadata.
    pub fn session(&self) -> &CallSession {
        &self.session
    }

    /// The transcript being replayed.
    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    /// The coaching-card catalog.
    pub fn catalog(&self) -> &TriggerCatalog {
        &self.catalog
    }

    /// Timing configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The engine's event bus, for subscribing consumers.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// The engine's event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The live-or-static metrics projector.
    pub fn projector(&self) -> &MetricsProjector {
        &self.projector
    }

    /// Live sentiment while Running, overall baseline otherwise.
    pub fn current_sentiment(&self) -> f64 {
        self.projector.sentiment(&self.state)
    }

    /// Live elapsed duration while Running, the recorded call length
    /// otherwise.
    pub fn current_duration(&self) -> &str {
        self.projector.duration(&self.state)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Begin replaying the call. Valid from `Idle` and `Ended` only;
    /// ignored otherwise (in particular, a second `start` while Running
    /// cannot double-arm the turn timer, and `Paused` is only exited
    /// via `stop`).
    ///
    /// Returns whether the command was applied.
    pub fn start(&mut self) -> bool {
        if !matches!(self.state.phase, Phase::Idle | Phase::Ended) {
            return false;
        }

        let now = self.clock.now();
        self.state.phase = Phase::Running;
        self.state.cursor = 1;
        self.state.displayed_entries = vec![self.first_entry.clone()];
        self.state.current_sentiment = self.baseline_sentiment;
        self.state.active_triggers.clear();
        self.state.started_at = Some(now);
        self.state.elapsed_display = "00:00".to_string();

        self.turn_timer = Some(self.timers.arm(self.config.turn_interval, now));
        self.duration_timer = Some(
            self.timers
                .arm(self.config.duration_refresh_interval, now),
        );

        self.bus.publish(&CallEvent::CallStarted);
        true
    }

    /// Pause the running call. Valid from `Running` only; ignored
    /// otherwise. Cancels both timers before returning.
    ///
    /// Returns whether the command was applied.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }

        self.cancel_timers();
        self.state.phase = Phase::Paused;
        self.bus.publish(&CallEvent::CallPaused);
        true
    }

    /// End the call and reset playback to the seeded first turn. Valid
    /// from any phase. Cancels any outstanding timers before returning.
    pub fn stop(&mut self) -> bool {
        self.cancel_timers();
        self.state.phase = Phase::Ended;
        self.state.cursor = 0;
        self.state.displayed_entries = vec![self.first_entry.clone()];
        self.state.current_sentiment = self.baseline_sentiment;
        self.state.active_triggers.clear();
        self.state.started_at = None;
        self.bus.publish(&CallEvent::CallEnded);
        true
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Fire every timer that has come due, oldest first.
    ///
    /// The host loop calls this as often as it likes; a manual clock
    /// that jumped several intervals replays the missed turn ticks in
    /// order within one call.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        for id in self.timers.due(now) {
            if self.turn_timer == Some(id) {
                self.advance_turn();
            } else if self.duration_timer == Some(id) {
                self.refresh_duration(now);
            }
            // Firings for timers cancelled mid-batch no longer match
            // either slot and fall through.
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(id) = self.turn_timer.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.duration_timer.take() {
            self.timers.cancel(id);
        }
    }

    // ========================================================================
    // Tick Handlers
    // ========================================================================

    /// Emit the next transcript turn.
    fn advance_turn(&mut self) {
        // A firing delivered after pause or stop must not mutate state.
        if self.state.phase != Phase::Running {
            return;
        }

        let entry = match self.transcript.entry_at(self.state.cursor) {
            Ok(entry) => entry.clone(),
            // Cursor already past the end (single-turn transcript).
            Err(_) => {
                self.complete();
                return;
            }
        };

        self.state.displayed_entries.push(entry.clone());
        self.state.current_sentiment = entry.sentiment;
        self.state.cursor += 1;

        // Each card surfaces at most once per call, however many turns
        // mention its keyword.
        let hits: Vec<TriggerDefinition> = self
            .catalog
            .matches(&entry.text)
            .into_iter()
            .cloned()
            .collect();
        for def in hits {
            if !self.state.active_triggers.iter().any(|id| *id == def.id) {
                self.state.active_triggers.push(def.id.clone());
                self.bus.publish(&CallEvent::RtaCardTriggered(def));
            }
        }

        self.bus.publish(&CallEvent::TranscriptUpdated(entry.clone()));
        self.bus.publish(&CallEvent::SentimentChanged(entry.sentiment));

        if self.state.cursor >= self.transcript.len() {
            self.complete();
        }
    }

    /// Transcript exhausted: end the call in place.
    ///
    /// Unlike an operator `stop`, completion freezes the displayed
    /// transcript and surfaced cards so the finished call remains
    /// readable; the next `start` resets them.
    fn complete(&mut self) {
        self.cancel_timers();
        self.state.phase = Phase::Ended;
        self.state.started_at = None;
        self.bus.publish(&CallEvent::CallEnded);
    }

    /// Recompute the elapsed-duration display.
    fn refresh_duration(&mut self, now: Duration) {
        if self.state.phase != Phase::Running {
            return;
        }
        if let Some(started) = self.state.started_at {
            self.state.elapsed_display = format_mm_ss(now.saturating_sub(started));
        }
    }
}

// Manual Debug implementation (clock and bus handlers don't implement Debug)
impl std::fmt::Debug for CallSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallSimulator")
            .field("session", &self.session.id)
            .field("phase", &self.state.phase)
            .field("cursor", &self.state.cursor)
            .field("transcript_len", &self.transcript.len())
            .field("active_triggers", &self.state.active_triggers.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
