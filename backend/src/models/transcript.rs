//! Conversation transcript
//!
//! An ordered, immutable sequence of conversation turns with precomputed
//! sentiment and keyword annotations. Fixed at construction; the store
//! is the sole owner of the entries for the process lifetime.
//!
//! Serde field names follow the demo fixture format (camelCase, with the
//! speaker role carried in a `type` field).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during transcript access
#[derive(Debug, Error, PartialEq)]
pub enum TranscriptError {
    #[error("Transcript index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Which side of the call produced an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Rep,
    Prospect,
}

/// A single conversation turn.
///
/// Sentiment is precomputed per turn and lies in [-1, 1]. Keywords are
/// the phrases already extracted for this turn; the trigger catalog does
/// its own matching over `text` and does not rely on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// 1-indexed turn number
    pub id: u32,

    /// Display name of the speaker
    pub speaker: String,

    /// Utterance text
    pub text: String,

    /// Timestamp label within the call (monotonically non-decreasing)
    pub timestamp: String,

    /// Precomputed sentiment score in [-1, 1]
    pub sentiment: f64,

    /// Speaker role (rep or prospect)
    #[serde(rename = "type")]
    pub role: SpeakerRole,

    /// Extracted keyword phrases
    pub keywords: Vec<String>,

    /// Filler words detected in this turn
    pub filler_words: u32,
}

/// Immutable ordered transcript of a recorded call.
///
/// # Example
/// ```
/// use call_simulator_core_rs::models::transcript::{SpeakerRole, TranscriptEntry, TranscriptStore};
///
/// let store = TranscriptStore::new(vec![TranscriptEntry {
///     id: 1,
///     speaker: "John".to_string(),
///     text: "Thanks for taking the time today.".to_string(),
///     timestamp: "00:01:15".to_string(),
///     sentiment: 0.7,
///     role: SpeakerRole::Rep,
///     keywords: vec![],
///     filler_words: 0,
/// }]);
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.entry_at(0).unwrap().speaker, "John");
/// assert!(store.entry_at(1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptStore {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptStore {
    /// Create a store over the given turns, preserving their order.
    pub fn new(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }

    /// Get the turn at `index`.
    pub fn entry_at(&self, index: usize) -> Result<&TranscriptEntry, TranscriptError> {
        self.entries.get(index).ok_or(TranscriptError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Number of turns in the transcript.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript has no turns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All turns, in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}
