//! Error types for rust_qnorm

use thiserror::Error;

/// Main error type for quantile normalization runs
#[derive(Error, Debug)]
pub enum QnormError {
    #[error("Shape mismatch in {sample}: expected {expected} rows, got {got}")]
    ShapeMismatch {
        sample: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid value at {location}: {reason}")]
    InvalidValue { location: String, reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Plotting failed: {reason}")]
    Plot { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for quantile normalization operations
pub type Result<T> = std::result::Result<T, QnormError>;
