//! Online anomaly detectors.
//!
//! Two streaming detectors over a univariate series, sharing the same
//! p-value estimator but answering different questions:
//!
//! - [`SpikeDetector`]: is this single observation a transient outlier?
//! - [`ChangepointDetector`]: has the underlying distribution shifted and
//!   stayed shifted?
//!
//! Both score each observation against a sliding window of the values seen
//! before it, then absorb the observation into the window, so a point never
//! contributes to its own p-value.

pub mod changepoint;
pub mod pvalue;
pub mod spike;
pub mod window;

pub use changepoint::{ChangepointDetector, Martingale};
pub use pvalue::empirical_p_value;
pub use spike::SpikeDetector;
pub use window::SlidingWindow;

use crate::error::{AnomalyError, Result};

/// Configuration shared by both detectors.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Confidence level in percent, strictly between 0 and 100.
    ///
    /// The alert significance is `alpha = 1 - confidence / 100`; a spike
    /// alerts when its p-value falls below alpha, a changepoint when the
    /// martingale exceeds `1 / alpha`.
    pub confidence: f64,
    /// Sliding window capacity (number of recent observations kept).
    pub history_length: usize,
    /// Betting exponent of the power martingale, strictly between 0 and 1.
    ///
    /// Smaller values react faster to small but sustained shifts. Only the
    /// changepoint detector uses it.
    pub epsilon: f64,
    /// Reset the martingale to its initial value after an alerting step.
    ///
    /// Off by default: the martingale stays elevated and keeps alerting
    /// until later observations pull p-values back up.
    pub reset_on_alert: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence: 95.0,
            history_length: 32,
            epsilon: 0.1,
            reset_on_alert: false,
        }
    }
}

impl DetectorConfig {
    /// Create a config with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default window capacity for a series of known length: a quarter of
    /// the series, and at least one.
    pub fn with_history_for_len(series_len: usize) -> Self {
        Self::default().history_length((series_len / 4).max(1))
    }

    /// Set the confidence level in percent.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the sliding window capacity.
    pub fn history_length(mut self, history_length: usize) -> Self {
        self.history_length = history_length;
        self
    }

    /// Set the martingale betting exponent.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set whether the martingale resets after an alerting step.
    pub fn reset_on_alert(mut self, reset: bool) -> Self {
        self.reset_on_alert = reset;
        self
    }

    /// Alert significance derived from the confidence level.
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence / 100.0
    }

    /// Check all parameters against their valid ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.confidence.is_finite() || self.confidence <= 0.0 || self.confidence >= 100.0 {
            return Err(AnomalyError::InvalidConfiguration(format!(
                "confidence must lie strictly between 0 and 100, got {}",
                self.confidence
            )));
        }
        if self.history_length == 0 {
            return Err(AnomalyError::InvalidConfiguration(
                "history_length must be positive".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 || self.epsilon >= 1.0 {
            return Err(AnomalyError::InvalidConfiguration(format!(
                "epsilon must lie strictly between 0 and 1, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Per-observation detection outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Whether this observation triggered an alert.
    pub alert: bool,
    /// Detector-specific anomaly strength; larger means more anomalous.
    ///
    /// The spike detector reports `-ln(p_value)`, the changepoint detector
    /// the current martingale value.
    pub score: f64,
    /// Two-sided p-value of the observation against recent history.
    pub p_value: f64,
    /// Current martingale value; `Some` only for the changepoint detector.
    pub martingale: Option<f64>,
}

/// Common interface of the streaming detectors.
///
/// Each call scores one observation against the history seen so far and
/// then absorbs it, so calls must arrive in stream order. Observations are
/// assumed finite; [`crate::engine::StreamingEngine`] validates them first.
pub trait Detector {
    /// Process one observation, producing its prediction.
    fn process(&mut self, value: f64) -> Prediction;
}
