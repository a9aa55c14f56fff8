//! Streaming engine driving detectors over an input sequence.

use crate::detection::{ChangepointDetector, Detector, DetectorConfig, Prediction, SpikeDetector};
use crate::error::{AnomalyError, Result};

/// Drives one detector over an ordered sequence of observations.
///
/// Processing is a strict synchronous fold: each observation is validated,
/// fully scored and absorbed before the next is touched, producing exactly
/// one prediction per input in input order. Independent engines share no
/// state and may run on separate threads.
#[derive(Debug)]
pub struct StreamingEngine<D: Detector> {
    detector: D,
    index: usize,
}

impl<D: Detector> StreamingEngine<D> {
    /// Wrap a detector at stream position zero.
    pub fn new(detector: D) -> Self {
        Self { detector, index: 0 }
    }

    /// Score one observation, advancing the stream position.
    ///
    /// Non-finite values fail with [`AnomalyError::InvalidInput`] carrying
    /// the stream index; the detector state is left untouched, so the caller
    /// decides whether to skip the record or halt.
    pub fn step(&mut self, value: f64) -> Result<Prediction> {
        if !value.is_finite() {
            return Err(AnomalyError::InvalidInput {
                index: self.index,
                reason: format!("expected a finite number, got {value}"),
            });
        }
        let prediction = self.detector.process(value);
        self.index += 1;
        Ok(prediction)
    }

    /// Score an entire series in order. Empty input yields empty output.
    pub fn run<I>(&mut self, values: I) -> Result<Vec<Prediction>>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter();
        let mut predictions = Vec::with_capacity(values.size_hint().0);
        for value in values {
            predictions.push(self.step(value)?);
        }
        Ok(predictions)
    }

    /// Score labeled records, passing each opaque label through unchanged
    /// and pairing it with the prediction for its value.
    pub fn run_labeled<L, I>(&mut self, records: I) -> Result<Vec<(L, Prediction)>>
    where
        I: IntoIterator<Item = (L, f64)>,
    {
        let records = records.into_iter();
        let mut predictions = Vec::with_capacity(records.size_hint().0);
        for (label, value) in records {
            predictions.push((label, self.step(value)?));
        }
        Ok(predictions)
    }
}

/// Run spike detection over a full series.
pub fn detect_spikes(values: &[f64], config: &DetectorConfig) -> Result<Vec<Prediction>> {
    let detector = SpikeDetector::new(config)?;
    StreamingEngine::new(detector).run(values.iter().copied())
}

/// Run changepoint detection over a full series.
pub fn detect_changepoints(values: &[f64], config: &DetectorConfig) -> Result<Vec<Prediction>> {
    let detector = ChangepointDetector::new(config)?;
    StreamingEngine::new(detector).run(values.iter().copied())
}
