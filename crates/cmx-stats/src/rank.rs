//! Mid-rank assignment
//!
//! Every rank-based statistic in this crate ranks the pooled samples the
//! same way: values are sorted ascending and numbered from 1, and each run
//! of tied values receives the average of the ranks it spans. For
//! `[10, 20, 20, 30]` the ranks are `[1, 2.5, 2.5, 4]`.

use serde::{Deserialize, Serialize};

/// Ranks of a set of values, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Rank of each input value
    pub ranks: Vec<f64>,
    /// Size of every tie group with more than one member
    pub tie_counts: Vec<usize>,
}

impl Ranking {
    /// Whether any two values were tied
    pub fn has_ties(&self) -> bool {
        !self.tie_counts.is_empty()
    }

    /// Sum of t³ - t over tie groups, used by tie corrections
    pub fn tie_term(&self) -> f64 {
        self.tie_counts
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }

    /// Sum of the ranks in `range` of the input
    pub fn rank_sum(&self, range: std::ops::Range<usize>) -> f64 {
        self.ranks[range].iter().sum()
    }
}

/// Rank values with ties averaged
///
/// Values are expected to be finite; NaN sorts after every number under
/// `f64::total_cmp` and would receive the highest ranks.
pub fn rank_average(values: &[f64]) -> Ranking {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut tie_counts = Vec::new();

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }

        // Positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = rank;
        }
        if end - start > 1 {
            tie_counts.push(end - start);
        }

        start = end;
    }

    Ranking { ranks, tie_counts }
}

/// Pool samples end to end, in argument order
pub(crate) fn pool(samples: &[&[f64]]) -> Vec<f64> {
    let total = samples.iter().map(|s| s.len()).sum();
    let mut pooled = Vec::with_capacity(total);
    for sample in samples {
        pooled.extend_from_slice(sample);
    }
    pooled
}
