//! Call-session metadata
//!
//! Static facts about the recorded call, supplied by the data-loading
//! collaborator at construction. The `duration` field is the static
//! display value consumers fall back to while no live call is running.

use serde::{Deserialize, Serialize};

/// Static metadata for one recorded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    /// Unique call identifier (e.g. "call_2025_001")
    pub id: String,

    /// Sales rep display name
    pub sales_rep: String,

    /// Prospect display name
    pub prospect: String,

    /// Prospect's company
    pub company: String,

    /// ISO-8601 start time of the recording
    pub start_time: String,

    /// Recorded call length, shown whenever no simulation is running
    pub duration: String,

    /// Session status label (e.g. "active")
    pub status: String,

    /// Call type label (e.g. "discovery")
    #[serde(rename = "type")]
    pub call_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_preserves_fields() {
        let session = CallSession {
            id: "call_2025_001".to_string(),
            sales_rep: "John Davis".to_string(),
            prospect: "Sarah Chen".to_string(),
            company: "TechCorp Solutions".to_string(),
            start_time: "2025-09-27T12:14:00Z".to_string(),
            duration: "00:23:45".to_string(),
            status: "active".to_string(),
            call_type: "discovery".to_string(),
        };

        let copy = session.clone();
        assert_eq!(copy, session);
        assert_eq!(copy.duration, "00:23:45");
    }
}
