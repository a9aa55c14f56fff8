//! Statistical utilities shared by the detectors.

pub mod stats;

pub use stats::{iqr, mean, median, quantile, std_dev, variance};
