//! Error types for cmx-stats

use thiserror::Error;

/// Errors raised by the statistical engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// A sample or argument violates a precondition of the computation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StatsError::InvalidInput(message.into())
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Reject empty samples and samples holding NaN or infinite values
pub(crate) fn check_sample(name: &str, sample: &[f64]) -> StatsResult<()> {
    if sample.is_empty() {
        return Err(StatsError::invalid(format!("{} is empty", name)));
    }
    if let Some(index) = sample.iter().position(|x| !x.is_finite()) {
        return Err(StatsError::invalid(format!(
            "{} has a non-finite value at index {}",
            name, index
        )));
    }
    Ok(())
}
