//! Two-sided Mann-Whitney U test
//!
//! Tests whether two independent samples come from the same distribution
//! using the rank sum of the first sample. The p-value comes from one of
//! two places:
//!
//! - **Exact**: the null distribution of U, counted exactly. Used when
//!   there are no ties and the smaller sample has at most 8 values.
//! - **Asymptotic**: normal approximation with tie correction and a 0.5
//!   continuity correction. Used otherwise.
//!
//! When every value in both samples is the same the variance of U is zero
//! and the test carries no information; the result is reported as
//! `Degenerate` with a p-value of 1.0 rather than an error.

use crate::error::{check_sample, StatsError, StatsResult};
use crate::rank::{pool, rank_average};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Largest smaller-sample size for which the exact distribution is used
pub const EXACT_MAX_SMALL_SAMPLE: usize = 8;

/// Upper bound on m·n for the exact distribution table
const EXACT_MAX_CELLS: usize = 1 << 20;

/// How the p-value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MannWhitneyMethod {
    Exact,
    Asymptotic,
    /// All values identical; p-value fixed at 1.0
    Degenerate,
}

/// Result of a two-sided Mann-Whitney U test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MannWhitneyResult {
    /// U statistic of the first sample
    pub u_statistic: f64,
    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
    pub method: MannWhitneyMethod,
}

impl MannWhitneyResult {
    /// Whether the p-value is below `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Run a two-sided Mann-Whitney U test of `sample_a` against `sample_b`
///
/// Fails with `InvalidInput` if either sample is empty or holds a
/// non-finite value.
pub fn mann_whitney_u(sample_a: &[f64], sample_b: &[f64]) -> StatsResult<MannWhitneyResult> {
    check_sample("sample A", sample_a)?;
    check_sample("sample B", sample_b)?;

    let m = sample_a.len();
    let n = sample_b.len();
    let ranking = rank_average(&pool(&[sample_a, sample_b]));

    let (mf, nf) = (m as f64, n as f64);
    let u1 = ranking.rank_sum(0..m) - mf * (mf + 1.0) / 2.0;
    let u2 = mf * nf - u1;
    let u = u1.max(u2);

    if !ranking.has_ties() && m.min(n) <= EXACT_MAX_SMALL_SAMPLE {
        if let Some(p_value) = exact_p_value(m, n, u) {
            return Ok(MannWhitneyResult {
                u_statistic: u1,
                p_value,
                method: MannWhitneyMethod::Exact,
            });
        }
    }

    let total = mf + nf;
    let mu = mf * nf / 2.0;
    let variance =
        mf * nf / 12.0 * ((total + 1.0) - ranking.tie_term() / (total * (total - 1.0)));

    if variance <= 0.0 {
        return Ok(MannWhitneyResult {
            u_statistic: u1,
            p_value: 1.0,
            method: MannWhitneyMethod::Degenerate,
        });
    }

    let z = (u - mu - 0.5) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::InvalidInput(e.to_string()))?;
    let p_value = (2.0 * normal.sf(z)).clamp(0.0, 1.0);

    Ok(MannWhitneyResult {
        u_statistic: u1,
        p_value,
        method: MannWhitneyMethod::Asymptotic,
    })
}

/// Two-sided exact p-value for `u = max(U1, U2)`
///
/// Returns `None` when the distribution table would be too large.
fn exact_p_value(m: usize, n: usize, u: f64) -> Option<f64> {
    let counts = u_null_counts(m, n)?;
    let total: i128 = counts.iter().sum();
    let u = u.round() as usize;

    let upper: i128 = counts.iter().skip(u).sum();
    Some((2.0 * upper as f64 / total as f64).min(1.0))
}

/// Number of rank arrangements giving each value of U under the null
///
/// These are the coefficients of the Gaussian binomial coefficient
/// `[m+n choose m]_q`, built as the product over i = 1..=m of
/// `(1 - q^(n+i)) / (1 - q^i)`. Every division is exact, so the integer
/// arithmetic never rounds.
fn u_null_counts(m: usize, n: usize) -> Option<Vec<i128>> {
    let (m, n) = (m.min(n), m.max(n));
    if m * n > EXACT_MAX_CELLS {
        return None;
    }
    // Every coefficient is bounded by C(m+n, m)
    let mut bound: u128 = 1;
    for i in 1..=m {
        bound = bound.checked_mul((n + i) as u128)? / i as u128;
    }
    if bound > i128::MAX as u128 {
        return None;
    }

    let mut coeffs = vec![0i128; m * n + m + 1];
    coeffs[0] = 1;
    let mut degree = 0;

    for i in 1..=m {
        let shift = n + i;
        for k in (shift..=degree + shift).rev() {
            coeffs[k] -= coeffs[k - shift];
        }
        degree += shift;

        for k in i..=degree {
            coeffs[k] += coeffs[k - i];
        }
        degree -= i;
    }

    coeffs.truncate(m * n + 1);
    Some(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_null_counts_small() {
        // m = 2, n = 2: U takes 0..=4 with counts 1, 1, 2, 1, 1
        assert_eq!(u_null_counts(2, 2).unwrap(), vec![1, 1, 2, 1, 1]);
        // m = 1: every value of U equally likely
        assert_eq!(u_null_counts(1, 4).unwrap(), vec![1; 5]);
    }

    #[test]
    fn test_null_counts_total_is_binomial() {
        let counts = u_null_counts(5, 5).unwrap();
        assert_eq!(counts.iter().sum::<i128>(), 252);
        assert!(counts.iter().all(|&c| c > 0));
        // Symmetric about m·n / 2
        let reversed: Vec<i128> = counts.iter().rev().copied().collect();
        assert_eq!(counts, reversed);
    }

    #[test]
    fn test_exact_separated_samples() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let result = mann_whitney_u(&a, &b).unwrap();

        assert_eq!(result.method, MannWhitneyMethod::Exact);
        assert_eq!(result.u_statistic, 0.0);
        assert!(close(result.p_value, 2.0 / 252.0, 1e-12));
        assert!(result.is_significant(0.05));
    }

    #[test]
    fn test_exact_is_symmetric_in_arguments() {
        let a = [0.1, 0.4, 0.35, 0.8];
        let b = [0.2, 0.9, 0.7, 0.6, 0.95];
        let ab = mann_whitney_u(&a, &b).unwrap();
        let ba = mann_whitney_u(&b, &a).unwrap();
        assert!(close(ab.p_value, ba.p_value, 1e-12));
        assert!(close(ab.u_statistic + ba.u_statistic, 20.0, 1e-12));
    }

    #[test]
    fn test_asymptotic_with_ties() {
        // Ties force the normal approximation
        let a = [1.0, 2.0, 2.0, 3.0];
        let b = [2.0, 3.0, 4.0, 4.0];
        let result = mann_whitney_u(&a, &b).unwrap();
        assert_eq!(result.method, MannWhitneyMethod::Asymptotic);

        // Pooled ranks: 1 -> 1, 2 -> 3 (x3), 3 -> 5.5 (x2), 4 -> 7.5 (x2)
        // R1 = 1 + 3 + 3 + 5.5 = 12.5, U1 = 2.5, U = 13.5
        assert!(close(result.u_statistic, 2.5, 1e-12));

        let tie_term: f64 = 24.0 + 6.0 + 6.0;
        let sigma: f64 = (16.0 / 12.0 * (9.0 - tie_term / 56.0)).sqrt();
        let z = (13.5 - 8.0 - 0.5) / sigma;
        let expected = 2.0 * Normal::new(0.0, 1.0).unwrap().sf(z);
        assert!(close(result.p_value, expected, 1e-12));
        assert!(result.p_value > 0.05 && result.p_value < 0.5);
    }

    #[test]
    fn test_asymptotic_large_samples() {
        let a: Vec<f64> = (0..30).map(|x| x as f64).collect();
        let b: Vec<f64> = (0..30).map(|x| x as f64 + 100.0).collect();
        let result = mann_whitney_u(&a, &b).unwrap();
        assert_eq!(result.method, MannWhitneyMethod::Asymptotic);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_equal_distributions_not_significant() {
        let a: Vec<f64> = (0..20).map(|x| (x * 2) as f64).collect();
        let b: Vec<f64> = (0..20).map(|x| (x * 2 + 1) as f64).collect();
        let result = mann_whitney_u(&a, &b).unwrap();
        assert!(result.p_value > 0.5);
    }

    #[test]
    fn test_identical_values_are_degenerate() {
        let result = mann_whitney_u(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(result.method, MannWhitneyMethod::Degenerate);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.u_statistic, 4.5);
    }

    #[rstest]
    #[case(&[], &[1.0])]
    #[case(&[1.0], &[])]
    #[case(&[f64::INFINITY], &[1.0])]
    fn test_invalid_samples(#[case] a: &[f64], #[case] b: &[f64]) {
        assert!(matches!(
            mann_whitney_u(a, b),
            Err(StatsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_p_value_is_clipped() {
        // U == mu gives 2 * sf(negative z) > 1 before clipping
        let result = mann_whitney_u(&[1.0, 2.0, 2.0], &[1.0, 2.0, 2.0]).unwrap();
        assert_eq!(result.p_value, 1.0);
    }
}
