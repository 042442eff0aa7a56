//! Vargha-Delaney A₁₂ effect size
//!
//! A₁₂ estimates the probability that a value drawn from sample A is
//! larger than one drawn from sample B, counting ties as one half:
//!
//! ```text
//! A₁₂ = (2·R₁ − m·(m+1)) / (2·m·n)
//! ```
//!
//! where `R₁` is the sum of the mid-ranks of A's values in the pooled
//! sample and `m`, `n` are the sample sizes. 0.5 means neither sample
//! tends to be larger.

use crate::error::{check_sample, StatsResult};
use crate::rank::{pool, rank_average};
use serde::{Deserialize, Serialize};

/// Compute the Vargha-Delaney A₁₂ of `sample_a` against `sample_b`
///
/// Fails with `InvalidInput` if either sample is empty or holds a
/// non-finite value.
pub fn vargha_delaney(sample_a: &[f64], sample_b: &[f64]) -> StatsResult<f64> {
    check_sample("sample A", sample_a)?;
    check_sample("sample B", sample_b)?;

    let m = sample_a.len();
    let n = sample_b.len();
    let ranking = rank_average(&pool(&[sample_a, sample_b]));
    let r1 = ranking.rank_sum(0..m);

    let (m, n) = (m as f64, n as f64);
    Ok((2.0 * r1 - m * (m + 1.0)) / (2.0 * m * n))
}

/// Conventional magnitude labels for A₁₂
///
/// Thresholds from Vargha & Delaney (2000), applied to the distance of A₁₂
/// from 0.5 in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Classify an A₁₂ value
    pub fn from_a12(a12: f64) -> Self {
        let scaled = a12.max(1.0 - a12);
        if scaled < 0.56 {
            EffectMagnitude::Negligible
        } else if scaled < 0.64 {
            EffectMagnitude::Small
        } else if scaled < 0.71 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
        }
    }
}

impl std::fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
