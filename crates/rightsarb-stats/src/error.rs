//! Error types for statistical routines.

use thiserror::Error;

/// Errors raised by tests whose preconditions fail.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// Not enough observations for the statistic
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Every difference is zero, so the signed-rank statistic is undefined
    #[error("All differences are zero")]
    AllZeroDifferences,

    /// Invalid configuration value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
