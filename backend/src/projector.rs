//! Derived metrics projection
//!
//! Consumers read one value per metric regardless of call state: the
//! live engine reading while a call runs, the static baseline snapshot
//! otherwise. The same fallback rule applies to every metric.

use std::collections::VecDeque;

use crate::engine::simulator::SimulationState;
use crate::models::metrics::BaselineMetrics;

/// Projects live-or-static metric values from engine state.
pub struct MetricsProjector {
    baseline: BaselineMetrics,
    static_duration: String,
}

impl MetricsProjector {
    /// `static_duration` is the recorded call length shown while no
    /// simulation is running.
    pub fn new(baseline: BaselineMetrics, static_duration: String) -> Self {
        Self {
            baseline,
            static_duration,
        }
    }

    /// Live sentiment while the call runs, overall baseline otherwise.
    pub fn sentiment(&self, state: &SimulationState) -> f64 {
        if state.is_running() {
            state.current_sentiment()
        } else {
            self.baseline.sentiment.overall
        }
    }

    /// Live elapsed duration while the call runs, the recorded call
    /// length otherwise.
    pub fn duration<'a>(&'a self, state: &'a SimulationState) -> &'a str {
        if state.is_running() {
            state.elapsed_display()
        } else {
            &self.static_duration
        }
    }

    /// The static baseline metrics.
    pub fn baseline(&self) -> &BaselineMetrics {
        &self.baseline
    }
}

// Manual Debug keeps output small (baseline is a large nested struct)
impl std::fmt::Debug for MetricsProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsProjector")
            .field("static_duration", &self.static_duration)
            .field("baseline_sentiment", &self.baseline.sentiment.overall)
            .finish()
    }
}

/// One point on the live sentiment chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Timestamp label of the turn that produced the score
    pub label: String,
    pub score: f64,
}

/// Rolling window of sentiment points for chart consumers.
///
/// One point is recorded per emitted turn; the window keeps only the
/// most recent `capacity` points.
///
/// # Example
/// ```
/// use call_simulator_core_rs::projector::SentimentTrend;
///
/// let mut trend = SentimentTrend::with_capacity(2);
/// trend.record("00:01:15", 0.7);
/// trend.record("00:01:22", 0.1);
/// trend.record("00:01:35", 0.6);
///
/// let scores: Vec<f64> = trend.points().map(|p| p.score).collect();
/// assert_eq!(scores, vec![0.1, 0.6]);
/// ```
#[derive(Debug, Clone)]
pub struct SentimentTrend {
    capacity: usize,
    points: VecDeque<TrendPoint>,
}

impl SentimentTrend {
    /// Window size used by the dashboard chart.
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "trend capacity must be positive");
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a point, evicting the oldest beyond capacity.
    pub fn record(&mut self, label: impl Into<String>, score: f64) {
        self.points.push_back(TrendPoint {
            label: label.into(),
            score,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points in chronological order.
    pub fn points(&self) -> impl Iterator<Item = &TrendPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all points (a new call starts a fresh chart).
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for SentimentTrend {
    fn default() -> Self {
        Self::new()
    }
}
