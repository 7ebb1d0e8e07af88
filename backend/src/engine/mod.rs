//! Simulation engine - call playback state machine
//!
//! Owns playback state, advances the transcript on a timed cadence,
//! updates derived metrics, runs trigger matching, and publishes
//! lifecycle and domain events.
//!
//! See `simulator.rs` for full implementation.

pub mod simulator;

// Re-export main types for convenience
pub use simulator::{CallSimulator, Phase, SimulationError, SimulationState, SimulatorConfig};
