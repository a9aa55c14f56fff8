//! Error types for the anofox-anomaly library.

use thiserror::Error;

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

/// Errors that can occur during anomaly detection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    /// An observation that cannot be scored (NaN or infinite).
    ///
    /// The engine surfaces the offending stream index so the caller can
    /// decide whether to skip the record or halt the stream; no default is
    /// substituted silently.
    #[error("invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// A configuration parameter outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
