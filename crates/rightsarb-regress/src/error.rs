//! Error types for regression fitting.

use thiserror::Error;

/// Errors that can occur while fitting a linear model.
#[derive(Debug, Error, PartialEq)]
pub enum RegressionError {
    /// Fewer observations than parameters
    #[error("Insufficient data: need more than {required} observations, got {actual}")]
    InsufficientData {
        /// Number of parameters
        required: usize,
        /// Number of observations
        actual: usize,
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Cross-product matrix cannot be inverted
    #[error("Design matrix is singular or nearly singular")]
    Singular,

    /// Formula could not be parsed
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    /// Unknown covariance type
    #[error("Unknown covariance type: {0}")]
    UnknownCovType(String),
}
