//! Pairwise comparison of configurations
//!
//! Every comparison path goes through [`compare_samples`]: the means of
//! both samples, their difference, the Vargha-Delaney A₁₂ of A against B
//! and the two-sided Mann-Whitney p-value.
//!
//! [`compare_groups`] runs it per target class over the classes present
//! under both configurations; [`overall_comparison`] runs it once per
//! metric over everything a configuration produced.

use serde::{Deserialize, Serialize};

use cmx_io::DataTable;
use cmx_stats::{mann_whitney_u, mean, vargha_delaney, EffectMagnitude, StatsResult};

use crate::config::ConfigurationId;
use crate::error::AnalysisResult;
use crate::grouping::{sample, GroupedTable};

/// Outcome of comparing one metric between two configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Target class, or `None` for whole-configuration comparisons
    pub subject: Option<String>,
    pub metric: String,
    pub group_a: ConfigurationId,
    pub group_b: ConfigurationId,
    pub mean_a: f64,
    pub mean_b: f64,
    /// `mean_a - mean_b`
    pub difference: f64,
    /// Vargha-Delaney A₁₂ of A against B
    pub effect_size: f64,
    /// Two-sided Mann-Whitney U p-value
    pub p_value: f64,
    pub n_a: usize,
    pub n_b: usize,
}

impl ComparisonResult {
    pub fn magnitude(&self) -> EffectMagnitude {
        EffectMagnitude::from_a12(self.effect_size)
    }

    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compare two samples of one metric
pub fn compare_samples(
    metric: &str,
    group_a: ConfigurationId,
    group_b: ConfigurationId,
    sample_a: &[f64],
    sample_b: &[f64],
) -> StatsResult<ComparisonResult> {
    let effect_size = vargha_delaney(sample_a, sample_b)?;
    let test = mann_whitney_u(sample_a, sample_b)?;

    // Both samples are non-empty and finite past this point
    let mean_a = mean(sample_a).unwrap_or(f64::NAN);
    let mean_b = mean(sample_b).unwrap_or(f64::NAN);

    Ok(ComparisonResult {
        subject: None,
        metric: metric.to_string(),
        group_a,
        group_b,
        mean_a,
        mean_b,
        difference: mean_a - mean_b,
        effect_size,
        p_value: test.p_value,
        n_a: sample_a.len(),
        n_b: sample_b.len(),
    })
}

/// Compare two configurations per subject
///
/// Only subjects present under both configurations are compared. Within a
/// subject, a metric with no values on either side is left out, and a
/// metric the engine rejects is logged and skipped. Results are sorted by
/// subject, then follow the order of `metric_columns`.
pub fn compare_groups<S: AsRef<str>>(
    table: &DataTable,
    group_key: &str,
    subject_key: &str,
    metric_columns: &[S],
    group_a: ConfigurationId,
    group_b: ConfigurationId,
) -> AnalysisResult<Vec<ComparisonResult>> {
    // Column problems surface before any work is done
    let metrics = load_metrics(table, metric_columns)?;
    let grouped = GroupedTable::by_group_and_subject(table, group_key, subject_key)?;

    let subjects = grouped.common_subjects(group_a.as_str(), group_b.as_str());
    tracing::debug!(
        "Comparing {} vs {} over {} common subjects",
        group_a,
        group_b,
        subjects.len()
    );

    let compare_subject = |subject: &&str| -> Vec<ComparisonResult> {
        let rows_a = grouped.subject_rows(group_a.as_str(), subject);
        let rows_b = grouped.subject_rows(group_b.as_str(), subject);

        metrics
            .iter()
            .filter_map(|(metric, values)| {
                let sample_a = sample(values, rows_a);
                let sample_b = sample(values, rows_b);
                if sample_a.is_empty() || sample_b.is_empty() {
                    tracing::debug!("No {} values for {} in one group, skipping", metric, subject);
                    return None;
                }

                match compare_samples(metric, group_a, group_b, &sample_a, &sample_b) {
                    Ok(mut result) => {
                        result.subject = Some(subject.to_string());
                        Some(result)
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {} for {}: {}", metric, subject, e);
                        None
                    }
                }
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let per_subject: Vec<Vec<ComparisonResult>> = {
        use rayon::prelude::*;
        subjects.par_iter().map(compare_subject).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let per_subject: Vec<Vec<ComparisonResult>> = subjects.iter().map(compare_subject).collect();

    let mut results: Vec<ComparisonResult> = per_subject.into_iter().flatten().collect();
    results.sort_by(|a, b| a.subject.cmp(&b.subject));
    Ok(results)
}

/// Compare two configurations over all of their rows, one result per metric
pub fn overall_comparison<S: AsRef<str>>(
    table: &DataTable,
    group_key: &str,
    metric_columns: &[S],
    group_a: ConfigurationId,
    group_b: ConfigurationId,
) -> AnalysisResult<Vec<ComparisonResult>> {
    let metrics = load_metrics(table, metric_columns)?;
    let grouped = GroupedTable::by_group(table, group_key)?;
    let rows_a = grouped.group_rows(group_a.as_str());
    let rows_b = grouped.group_rows(group_b.as_str());

    let mut results = Vec::with_capacity(metrics.len());
    for (metric, values) in &metrics {
        let sample_a = sample(values, rows_a);
        let sample_b = sample(values, rows_b);

        match compare_samples(metric, group_a, group_b, &sample_a, &sample_b) {
            Ok(result) => results.push(result),
            Err(e) => tracing::warn!("Skipping {} for {} vs {}: {}", metric, group_a, group_b, e),
        }
    }
    Ok(results)
}

/// Read every metric column as numbers, failing on the first bad column
pub(crate) fn load_metrics<S: AsRef<str>>(
    table: &DataTable,
    metric_columns: &[S],
) -> AnalysisResult<Vec<(String, Vec<f64>)>> {
    metric_columns
        .iter()
        .map(|metric| {
            let metric = metric.as_ref();
            Ok((metric.to_string(), table.numeric_column(metric)?))
        })
        .collect()
}
