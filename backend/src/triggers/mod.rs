//! Coaching-card trigger catalog
//!
//! Maps keywords to real-time assist cards. The catalog is loaded once
//! and never mutated; matching is a pure function over an utterance.

use serde::{Deserialize, Serialize};

/// Category of a coaching card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerCategory {
    Competitive,
    Objection,
    System,
}

/// A keyword-activated coaching card.
///
/// `trigger` is matched case-insensitively as a substring of the
/// utterance text. `id` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    pub id: String,

    /// Keyword that activates the card
    pub trigger: String,

    pub title: String,
    pub content: String,

    #[serde(rename = "type")]
    pub category: TriggerCategory,
}

/// Ordered, immutable collection of trigger definitions.
///
/// # Example
/// ```
/// use call_simulator_core_rs::triggers::{TriggerCatalog, TriggerCategory, TriggerDefinition};
///
/// let catalog = TriggerCatalog::new(vec![TriggerDefinition {
///     id: "budget".to_string(),
///     trigger: "budget".to_string(),
///     title: "Budget Objection Handler".to_string(),
///     content: "Show 3x return in year 1.".to_string(),
///     category: TriggerCategory::Objection,
/// }]);
///
/// let hits = catalog.matches("Honestly, Budget is tight this quarter.");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "budget");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerCatalog {
    definitions: Vec<TriggerDefinition>,
}

impl TriggerCatalog {
    /// Create a catalog, preserving registration order.
    pub fn new(definitions: Vec<TriggerDefinition>) -> Self {
        Self { definitions }
    }

    /// Definitions whose keyword occurs case-insensitively as a
    /// substring of `text`, in registration order. No fuzzy matching.
    pub fn matches(&self, text: &str) -> Vec<&TriggerDefinition> {
        let haystack = text.to_lowercase();
        self.definitions
            .iter()
            .filter(|def| haystack.contains(&def.trigger.to_lowercase()))
            .collect()
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&TriggerDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions, in registration order.
    pub fn definitions(&self) -> &[TriggerDefinition] {
        &self.definitions
    }
}
