//! Error types for cmx-analysis

use thiserror::Error;

use cmx_io::IoError;
use cmx_stats::StatsError;

/// Main error type for analysis runs
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Reading or writing a table failed, including missing or mistyped columns
    #[error("Table error: {0}")]
    Io(#[from] IoError),

    /// A statistical precondition was violated
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_error_display() {
        let err = AnalysisError::from(IoError::ColumnNotFound("Coverage".to_string()));
        assert!(err.to_string().contains("Coverage"));
    }

    #[test]
    fn test_stats_error_display() {
        let err = AnalysisError::from(StatsError::InvalidInput("sample A is empty".to_string()));
        assert!(err.to_string().contains("sample A is empty"));
    }
}
