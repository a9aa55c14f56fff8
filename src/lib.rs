//! # anofox-anomaly
//!
//! Online anomaly detection for univariate time series.
//!
//! Processes a stream of observations in a single pass and flags two kinds
//! of anomalies:
//!
//! - **Spikes**: transient single-point outliers, scored by an adaptive
//!   kernel-density p-value against a sliding window of recent history.
//! - **Changepoints**: sustained distribution shifts, detected by a power
//!   martingale that accumulates evidence across the stream of p-values.
//!
//! # Example
//!
//! ```
//! use anofox_anomaly::detection::DetectorConfig;
//! use anofox_anomaly::engine::detect_spikes;
//!
//! // Flat sales history with one transient spike.
//! let mut series = vec![100.0; 20];
//! series[12] = 900.0;
//!
//! let config = DetectorConfig::default().history_length(5);
//! let predictions = detect_spikes(&series, &config).unwrap();
//!
//! assert_eq!(predictions.len(), series.len());
//! assert!(predictions[12].alert);
//! assert!(!predictions[13].alert);
//! ```

pub mod detection;
pub mod engine;
pub mod error;
pub mod utils;

pub use error::{AnomalyError, Result};

pub mod prelude {
    pub use crate::detection::{
        ChangepointDetector, Detector, DetectorConfig, Prediction, SpikeDetector,
    };
    pub use crate::engine::{detect_changepoints, detect_spikes, StreamingEngine};
    pub use crate::error::{AnomalyError, Result};
}
