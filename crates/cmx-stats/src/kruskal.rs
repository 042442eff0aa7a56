//! Kruskal-Wallis H test
//!
//! Rank-based one-way analysis of variance across k independent samples.
//! The H statistic is tie-corrected and compared against a chi-squared
//! distribution with k - 1 degrees of freedom.

use crate::error::{check_sample, StatsError, StatsResult};
use crate::rank::{pool, rank_average};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Result of a Kruskal-Wallis H test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KruskalWallisResult {
    /// Tie-corrected H statistic
    pub h_statistic: f64,
    /// Chi-squared p-value
    pub p_value: f64,
    /// Number of non-empty samples minus one
    pub degrees_of_freedom: usize,
}

/// Run a Kruskal-Wallis H test over `samples`
///
/// Empty samples are ignored. Fails with `InvalidInput` when fewer than
/// two non-empty samples remain or a value is non-finite. When every value
/// is the same, H is 0 and the p-value is 1.
pub fn kruskal_wallis(samples: &[&[f64]]) -> StatsResult<KruskalWallisResult> {
    let groups: Vec<&[f64]> = samples.iter().copied().filter(|s| !s.is_empty()).collect();
    if groups.len() < 2 {
        return Err(StatsError::invalid(format!(
            "Kruskal-Wallis needs at least two non-empty samples, got {}",
            groups.len()
        )));
    }
    for (i, group) in groups.iter().enumerate() {
        check_sample(&format!("sample {}", i + 1), group)?;
    }

    let ranking = rank_average(&pool(&groups));
    let total = ranking.ranks.len() as f64;
    let degrees_of_freedom = groups.len() - 1;

    let correction = 1.0 - ranking.tie_term() / (total * total * total - total);
    if correction <= 0.0 {
        return Ok(KruskalWallisResult {
            h_statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom,
        });
    }

    let mut offset = 0;
    let mut weighted = 0.0;
    for group in &groups {
        let rank_sum = ranking.rank_sum(offset..offset + group.len());
        weighted += rank_sum * rank_sum / group.len() as f64;
        offset += group.len();
    }

    let h = 12.0 / (total * (total + 1.0)) * weighted - 3.0 * (total + 1.0);
    let h_statistic = (h / correction).max(0.0);

    let chi_squared = ChiSquared::new(degrees_of_freedom as f64)
        .map_err(|e| StatsError::InvalidInput(e.to_string()))?;
    let p_value = chi_squared.sf(h_statistic).clamp(0.0, 1.0);

    Ok(KruskalWallisResult {
        h_statistic,
        p_value,
        degrees_of_freedom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_known_statistic_without_ties() {
        // Ranks: [1, 2, 3], [4, 5, 6], [7, 8, 9]; rank sums 6, 15, 24
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let c = [7.0, 8.0, 9.0];
        let result = kruskal_wallis(&[&a, &b, &c]).unwrap();

        // 12 / 90 * (12 + 75 + 192) - 30 = 7.2
        assert!((result.h_statistic - 7.2).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 2);
        // Chi-squared(2) survival is exp(-H / 2)
        assert!((result.p_value - (-3.6f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_tie_correction_applied() {
        let a = [1.0, 1.0, 2.0];
        let b = [2.0, 3.0, 3.0];
        let result = kruskal_wallis(&[&a, &b]).unwrap();

        // Ranks 1.5, 1.5, 3.5 | 3.5, 5.5, 5.5; rank sums 6.5 and 14.5
        let raw = 12.0 / 42.0 * (6.5f64 * 6.5 / 3.0 + 14.5 * 14.5 / 3.0) - 21.0;
        let correction = 1.0 - 18.0 / 210.0;
        assert!((result.h_statistic - raw / correction).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 1);
    }

    #[test]
    fn test_all_identical() {
        let a = [0.7; 4];
        let result = kruskal_wallis(&[&a, &a, &a]).unwrap();
        assert_eq!(result.h_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_empty_samples_are_ignored() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let with_empty = kruskal_wallis(&[&a, &[], &b]).unwrap();
        let without = kruskal_wallis(&[&a, &b]).unwrap();
        assert_eq!(with_empty.degrees_of_freedom, 1);
        assert!((with_empty.h_statistic - without.h_statistic).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_samples() {
        let a = [1.0, 2.0];
        assert!(matches!(
            kruskal_wallis(&[&a]),
            Err(StatsError::InvalidInput(_))
        ));
        assert!(kruskal_wallis(&[&a, &[]]).is_err());
        assert!(kruskal_wallis(&[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let a = [1.0, f64::NAN];
        let b = [2.0, 3.0];
        assert!(kruskal_wallis(&[&a, &b]).is_err());
    }

    #[test]
    fn test_same_distribution_rarely_significant() {
        // Under the null, p < 0.05 should happen for about 5% of draws
        let mut rng = StdRng::seed_from_u64(42);
        let mut not_significant = 0;
        for _ in 0..100 {
            let draw = |rng: &mut StdRng| -> Vec<f64> { (0..12).map(|_| rng.gen::<f64>()).collect() };
            let a = draw(&mut rng);
            let b = draw(&mut rng);
            let c = draw(&mut rng);
            let result = kruskal_wallis(&[&a, &b, &c]).unwrap();
            if result.p_value > 0.05 {
                not_significant += 1;
            }
        }
        assert!(not_significant >= 85, "only {} of 100 above 0.05", not_significant);
    }

    #[test]
    fn test_shifted_distribution_detected() {
        let mut rng = StdRng::seed_from_u64(7);
        let a: Vec<f64> = (0..20).map(|_| rng.gen::<f64>()).collect();
        let b: Vec<f64> = (0..20).map(|_| rng.gen::<f64>()).collect();
        let c: Vec<f64> = (0..20).map(|_| rng.gen::<f64>() + 2.0).collect();
        let result = kruskal_wallis(&[&a, &b, &c]).unwrap();
        assert!(result.p_value < 0.001);
    }
}
