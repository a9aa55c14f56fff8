//! Spike detection for transient single-point outliers.

use super::pvalue::empirical_p_value;
use super::window::SlidingWindow;
use super::{Detector, DetectorConfig, Prediction};
use crate::error::Result;

/// Detects transient spikes in a stream of observations.
///
/// Each observation is scored against the sliding window of values seen
/// before it; an alert fires when the two-sided p-value drops below
/// `1 - confidence / 100`. The detector keeps no state beyond the window,
/// so an isolated spike flags exactly one point and nothing after it.
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    alpha: f64,
    window: SlidingWindow,
}

impl SpikeDetector {
    /// Create a detector, validating the configuration.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alpha: config.alpha(),
            window: SlidingWindow::new(config.history_length),
        })
    }
}

impl Detector for SpikeDetector {
    fn process(&mut self, value: f64) -> Prediction {
        // Score against history only, then absorb: a point must never
        // contribute to its own p-value.
        let p_value = empirical_p_value(&self.window.snapshot(), value);
        self.window.push(value);

        Prediction {
            alert: p_value < self.alpha,
            score: anomaly_strength(p_value),
            p_value,
            martingale: None,
        }
    }
}

/// Continuous anomaly strength: grows as the p-value shrinks, comparable
/// across points. Floored at the smallest positive double so an exact zero
/// p-value still yields a finite score.
fn anomaly_strength(p_value: f64) -> f64 {
    -p_value.max(f64::MIN_POSITIVE).ln()
}
