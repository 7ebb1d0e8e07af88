//! Demo call fixture
//!
//! The data-loading collaborator for the terminal replay: one JSON
//! document carrying the session metadata, the recorded transcript,
//! the baseline metrics, and the coaching-card catalog.

use serde::Deserialize;

use call_simulator_core_rs::{BaselineMetrics, CallSession, TranscriptEntry, TriggerDefinition};

const DEMO_CALL: &str = include_str!("../data/demo_call.json");

/// Everything the engine consumes for one call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFixture {
    pub call_session: CallSession,
    pub transcript: Vec<TranscriptEntry>,
    pub metrics: BaselineMetrics,
    pub rta_cards: Vec<TriggerDefinition>,
}

impl CallFixture {
    /// The bundled discovery-call demo.
    pub fn demo() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_CALL)
    }
}
