//! Baseline call metrics
//!
//! Precomputed metrics for the recorded call: the static side of every
//! live-versus-static fallback in the dashboard. All values arrive from
//! the data-loading collaborator and are never mutated by the engine.

use serde::{Deserialize, Serialize};

/// Precomputed sentiment summary for the whole call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    /// Call-wide sentiment baseline in [-1, 1]
    pub overall: f64,

    /// Sentiment of the most recent recorded turn
    pub current: f64,

    /// Trend label (e.g. "positive")
    pub trend: String,

    /// Per-turn sentiment history, transcript order
    pub history: Vec<f64>,
}

/// Rep versus prospect share of talking time, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkListenRatio {
    pub rep: u32,
    pub prospect: u32,
    pub target: u32,
    pub status: String,
}

/// Speaking pace in words per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingPace {
    pub current: u32,
    pub average: u32,
    pub target: u32,
    pub status: String,
}

/// Filler-word totals for the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerWordStats {
    pub count: u32,

    /// Filler words per minute
    pub rate: f64,

    pub target: u32,
    pub status: String,
}

/// Engagement indicators for the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    pub score: u32,
    pub questions: u32,
    pub interruptions: u32,
}

/// All baseline metrics for one recorded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetrics {
    pub sentiment: SentimentSummary,
    pub talk_listen_ratio: TalkListenRatio,
    pub speaking_pace: SpeakingPace,
    pub filler_words: FillerWordStats,
    pub engagement: EngagementStats,
}

/// Coarse sentiment classification used across the dashboard.
///
/// Scores above 0.3 read as positive, below -0.3 as negative, anything
/// between as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a sentiment score.
    ///
    /// # Example
    /// ```
    /// use call_simulator_core_rs::models::metrics::SentimentLabel;
    ///
    /// assert_eq!(SentimentLabel::from_score(0.65), SentimentLabel::Positive);
    /// assert_eq!(SentimentLabel::from_score(0.1), SentimentLabel::Neutral);
    /// assert_eq!(SentimentLabel::from_score(-0.4), SentimentLabel::Negative);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            SentimentLabel::Positive
        } else if score < -0.3 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Signed two-decimal sentiment display: `+0.65`, `-0.30`, `0.00`.
pub fn format_score(score: f64) -> String {
    if score > 0.0 {
        format!("+{:.2}", score)
    } else {
        format!("{:.2}", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.31), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.3), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.3), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.31), SentimentLabel::Negative);
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(0.65), "+0.65");
        assert_eq!(format_score(-0.3), "-0.30");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn label_strings() {
        assert_eq!(SentimentLabel::Positive.as_str(), "positive");
        assert_eq!(SentimentLabel::Negative.as_str(), "negative");
    }
}
