//! Kruskal-Wallis across all configurations

use serde::{Deserialize, Serialize};

use cmx_io::DataTable;
use cmx_stats::kruskal_wallis;

use crate::compare::load_metrics;
use crate::config::ConfigurationId;
use crate::error::AnalysisResult;
use crate::grouping::{sample, GroupedTable};

/// Kruskal-Wallis result for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmnibusResult {
    pub metric: String,
    /// Configurations that contributed values
    pub groups: Vec<ConfigurationId>,
    pub h_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Test each metric for any difference between `groups`
///
/// Configurations without values for a metric are left out of its test; a
/// metric with fewer than two contributing configurations is logged and
/// skipped.
pub fn omnibus<S: AsRef<str>>(
    table: &DataTable,
    group_key: &str,
    metric_columns: &[S],
    groups: &[ConfigurationId],
) -> AnalysisResult<Vec<OmnibusResult>> {
    let metrics = load_metrics(table, metric_columns)?;
    let grouped = GroupedTable::by_group(table, group_key)?;

    let mut results = Vec::with_capacity(metrics.len());
    for (metric, values) in &metrics {
        let samples: Vec<(ConfigurationId, Vec<f64>)> = groups
            .iter()
            .map(|&group| (group, sample(values, grouped.group_rows(group.as_str()))))
            .filter(|(_, s)| !s.is_empty())
            .collect();
        let slices: Vec<&[f64]> = samples.iter().map(|(_, s)| s.as_slice()).collect();

        match kruskal_wallis(&slices) {
            Ok(test) => results.push(OmnibusResult {
                metric: metric.clone(),
                groups: samples.iter().map(|(group, _)| *group).collect(),
                h_statistic: test.h_statistic,
                p_value: test.p_value,
                degrees_of_freedom: test.degrees_of_freedom,
            }),
            Err(e) => tracing::warn!("Skipping Kruskal-Wallis for {}: {}", metric, e),
        }
    }
    Ok(results)
}
