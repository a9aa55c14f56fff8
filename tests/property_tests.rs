//! Property-based tests for the detection invariants.
//!
//! These verify contracts that must hold for every valid input sequence,
//! using randomly generated series and configurations.

use anofox_anomaly::detection::{empirical_p_value, DetectorConfig};
use anofox_anomaly::engine::{detect_changepoints, detect_spikes};
use proptest::prelude::*;

/// Strategy for finite observation values in a realistic range.
fn series_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn p_values_always_lie_in_unit_interval(
        window in prop::collection::vec(-1.0e6..1.0e6f64, 0..64),
        value in -1.0e6..1.0e6f64,
    ) {
        let p = empirical_p_value(&window, value);
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }

    #[test]
    fn spike_alert_is_exactly_the_threshold_test(
        series in series_strategy(120),
        history in 1usize..40,
        confidence in 50.0..99.9f64,
    ) {
        let config = DetectorConfig::default()
            .history_length(history)
            .confidence(confidence);
        let alpha = config.alpha();
        let predictions = detect_spikes(&series, &config).unwrap();

        prop_assert_eq!(predictions.len(), series.len());
        for prediction in &predictions {
            prop_assert!((0.0..=1.0).contains(&prediction.p_value));
            prop_assert_eq!(prediction.alert, prediction.p_value < alpha);
            prop_assert!(prediction.martingale.is_none());
        }
    }

    #[test]
    fn changepoint_output_is_well_formed(
        series in series_strategy(120),
        history in 1usize..40,
    ) {
        let config = DetectorConfig::default().history_length(history);
        let predictions = detect_changepoints(&series, &config).unwrap();

        prop_assert_eq!(predictions.len(), series.len());
        for prediction in &predictions {
            prop_assert!((0.0..=1.0).contains(&prediction.p_value));
            let martingale = prediction.martingale.unwrap();
            prop_assert!(martingale.is_finite());
            prop_assert!(martingale >= 1.0);
            prop_assert_eq!(prediction.score.to_bits(), martingale.to_bits());
            prop_assert_eq!(prediction.alert, martingale > 1.0 / config.alpha());
        }
    }

    #[test]
    fn reruns_yield_bit_identical_predictions(
        series in series_strategy(80),
        history in 1usize..20,
    ) {
        let config = DetectorConfig::default().history_length(history);
        let first = detect_changepoints(&series, &config).unwrap();
        let second = detect_changepoints(&series, &config).unwrap();
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.p_value.to_bits(), b.p_value.to_bits());
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
            prop_assert_eq!(a.alert, b.alert);
        }
    }
}
