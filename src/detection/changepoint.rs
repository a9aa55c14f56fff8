//! Changepoint detection via a power martingale over p-values.

use super::pvalue::empirical_p_value;
use super::window::SlidingWindow;
use super::{Detector, DetectorConfig, Prediction};
use crate::error::Result;

/// Floor applied to p-values inside the betting function. Bounds the
/// evidence a single observation can contribute: one extreme point moves
/// the martingale by at most `epsilon * floor^(epsilon - 1)` (about 50x at
/// the defaults), while a sustained run still compounds without limit.
const P_VALUE_FLOOR: f64 = 1e-3;

/// Initial martingale value, also its lower bound.
const MARTINGALE_INITIAL: f64 = 1.0;

/// Upper bound on the accumulated martingale, keeping a long run of extreme
/// p-values inside f64 range.
const MARTINGALE_CAP: f64 = 1e100;

/// Power-martingale accumulator over a stream of p-values.
///
/// Starts at 1.0 and multiplies by the betting function
/// `epsilon * p^(epsilon - 1)` per p-value. Under uniform (no-change)
/// p-values the expected bet is exactly 1, so by Ville's inequality the
/// probability of the product ever exceeding `1 / alpha` is at most `alpha`;
/// a sustained run of small p-values drives it up multiplicatively.
///
/// The accumulated value is floored at its starting value, the
/// multiplicative analogue of a CUSUM reset: without the floor a long
/// nominal stretch (p-values near 1 each bet `epsilon < 1`) would build up
/// negative evidence that masks a later genuine shift.
#[derive(Debug, Clone)]
pub struct Martingale {
    value: f64,
    epsilon: f64,
}

impl Martingale {
    /// New accumulator with betting exponent `epsilon` in (0, 1).
    pub fn new(epsilon: f64) -> Self {
        Self {
            value: MARTINGALE_INITIAL,
            epsilon,
        }
    }

    /// Fold one p-value into the accumulated value and return it.
    pub fn update(&mut self, p_value: f64) -> f64 {
        let p = p_value.clamp(P_VALUE_FLOOR, 1.0);
        let bet = self.epsilon * p.powf(self.epsilon - 1.0);
        self.value = (self.value * bet).clamp(MARTINGALE_INITIAL, MARTINGALE_CAP);
        self.value
    }

    /// Current accumulated value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Reset to the initial value.
    pub fn reset(&mut self) {
        self.value = MARTINGALE_INITIAL;
    }
}

/// Detects sustained distribution shifts.
///
/// P-values are computed exactly as for spike detection, then folded into a
/// power martingale; an alert fires while the martingale exceeds
/// `1 / (1 - confidence / 100)`. An isolated spike contributes one bounded
/// bet and decays away, so only a run of improbable observations sustains
/// an alert.
///
/// By default the martingale is not reset after an alert, so it stays
/// elevated until later observations pull p-values back up;
/// [`DetectorConfig::reset_on_alert`] opts into resetting so subsequent
/// independent changepoints start from a clean slate.
#[derive(Debug, Clone)]
pub struct ChangepointDetector {
    threshold: f64,
    reset_on_alert: bool,
    window: SlidingWindow,
    martingale: Martingale,
}

impl ChangepointDetector {
    /// Create a detector, validating the configuration.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: 1.0 / config.alpha(),
            reset_on_alert: config.reset_on_alert,
            window: SlidingWindow::new(config.history_length),
            martingale: Martingale::new(config.epsilon),
        })
    }

    /// Martingale threshold above which the detector alerts.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Detector for ChangepointDetector {
    fn process(&mut self, value: f64) -> Prediction {
        // Same ordering rule as spike detection: p-value first, then the
        // window absorbs the point.
        let p_value = empirical_p_value(&self.window.snapshot(), value);
        let martingale = self.martingale.update(p_value);
        self.window.push(value);

        let alert = martingale > self.threshold;
        if alert && self.reset_on_alert {
            self.martingale.reset();
        }

        Prediction {
            alert,
            score: martingale,
            p_value,
            martingale: Some(martingale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_invalid_config() {
        let config = DetectorConfig::default().epsilon(1.5);
        assert!(ChangepointDetector::new(&config).is_err());
    }

    #[test]
    fn betting_function_math() {
        let mut martingale = Martingale::new(0.1);
        // One bet of epsilon * p^(epsilon - 1) at p = 0.01: 0.1 * 0.01^-0.9.
        let value = martingale.update(0.01);
        assert_relative_eq!(value, 0.1 * 0.01f64.powf(-0.9), epsilon = 1e-10);
    }

    #[test]
    fn nominal_p_values_keep_it_at_the_floor() {
        let mut martingale = Martingale::new(0.1);
        for _ in 0..50 {
            martingale.update(1.0);
        }
        assert_relative_eq!(martingale.value(), 1.0);
    }

    #[test]
    fn sustained_small_p_values_compound() {
        let mut martingale = Martingale::new(0.1);
        let mut previous = martingale.value();
        for _ in 0..10 {
            let value = martingale.update(0.01);
            assert!(value > previous);
            previous = value;
        }
        assert!(martingale.value() > 1.0 / 0.05);
    }

    #[test]
    fn a_single_extreme_p_value_is_bounded() {
        let mut martingale = Martingale::new(0.1);
        let value = martingale.update(0.0);
        // Clamped at the p-value floor: 0.1 * (1e-3)^-0.9 ~ 50.
        assert_relative_eq!(value, 0.1 * 1e-3f64.powf(-0.9), epsilon = 1e-8);
        assert!(value.is_finite());
    }

    #[test]
    fn stays_capped_under_relentless_evidence() {
        let mut martingale = Martingale::new(0.1);
        for _ in 0..200 {
            martingale.update(0.0);
        }
        assert!(martingale.value() <= MARTINGALE_CAP);
        assert!(martingale.value().is_finite());
    }

    #[test]
    fn reset_returns_to_initial_value() {
        let mut martingale = Martingale::new(0.1);
        martingale.update(0.001);
        assert!(martingale.value() > 1.0);
        martingale.reset();
        assert_relative_eq!(martingale.value(), 1.0);
    }

    #[test]
    fn reset_on_alert_clears_the_martingale() {
        let config = DetectorConfig::default()
            .history_length(5)
            .reset_on_alert(true);
        let mut det = ChangepointDetector::new(&config).unwrap();
        for _ in 0..5 {
            det.process(100.0);
        }
        let first = det.process(500.0);
        assert!(first.alert);
        // Martingale restarted, so the next step reports a fresh value.
        let second = det.process(500.0);
        assert!(second.martingale.unwrap() < first.martingale.unwrap());
    }

    #[test]
    fn reports_martingale_as_score() {
        let mut det =
            ChangepointDetector::new(&DetectorConfig::default().history_length(4)).unwrap();
        for value in [10.0, 11.0, 9.0, 10.5, 30.0] {
            let prediction = det.process(value);
            let martingale = prediction.martingale.unwrap();
            assert_relative_eq!(prediction.score, martingale);
            assert!(martingale >= 1.0);
        }
    }
}
