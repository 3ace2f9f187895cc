//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file does not exist
    #[error("Data file not found: {0}")]
    FileNotFound(String),

    /// A column required by the study is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No complete rows remain after listwise deletion
    #[error("No complete observations for {response} ~ {regressors}")]
    NoCompleteRows {
        /// Response column
        response: String,
        /// Regressor columns joined by " + "
        regressors: String,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::MissingColumn("OUT1".to_string());
        assert_eq!(err.to_string(), "Missing column: OUT1");

        let err = DataError::NoCompleteRows {
            response: "MAB".to_string(),
            regressors: "SmallCap + SMB".to_string(),
        };
        assert!(err.to_string().contains("MAB ~ SmallCap + SMB"));
    }
}
