//! Summary statistics for samples
//!
//! Provides the descriptive side of a comparison:
//! - Mean, variance (population and sample), standard deviation
//! - Min, max, range
//! - Robust statistics (median, MAD)
//!
//! Non-finite values are treated as missing and counted separately.

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Sample variance (n - 1 denominator), NaN for fewer than two values
    pub sample_variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Median Absolute Deviation
    pub mad: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - sorted.len();

        if sorted.is_empty() {
            return Self::empty(missing);
        }

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        let squares: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
        let variance = squares / count as f64;
        let sample_variance = if count > 1 {
            squares / (count - 1) as f64
        } else {
            f64::NAN
        };

        sorted.sort_by(f64::total_cmp);
        let min = sorted[0];
        let max = sorted[count - 1];
        let median = median_of_sorted(&sorted);

        let mut deviations: Vec<f64> = sorted.iter().map(|x| (x - median).abs()).collect();
        deviations.sort_by(f64::total_cmp);
        let mad = median_of_sorted(&deviations);

        Self {
            count,
            missing,
            min,
            max,
            mean,
            variance,
            sample_variance,
            std_dev: variance.sqrt(),
            median,
            mad,
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            variance: f64::NAN,
            sample_variance: f64::NAN,
            std_dev: f64::NAN,
            median: f64::NAN,
            mad: f64::NAN,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether any finite value was seen
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

/// Mean of the finite values, or `None` if there are none
pub fn mean(data: &[f64]) -> Option<f64> {
    let (sum, count) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(sum, count), &x| (sum + x, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
