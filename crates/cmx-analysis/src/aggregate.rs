//! Per-configuration averages

use serde::{Deserialize, Serialize};

use cmx_io::DataTable;
use cmx_stats::SummaryStats;

use crate::compare::load_metrics;
use crate::error::AnalysisResult;
use crate::grouping::{sample, GroupedTable};

/// Mean and sample variance of one column within one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAverage {
    pub column: String,
    /// NaN when the configuration has no values for the column
    pub mean: f64,
    /// NaN for fewer than two values
    pub variance: f64,
    pub count: usize,
}

/// Averages for every requested column within one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    /// Configuration label as it appears in the table
    pub group: String,
    /// Number of rows in the configuration
    pub rows: usize,
    pub columns: Vec<ColumnAverage>,
}

/// Average `columns` per group of `group_key`, groups in sorted order
///
/// Every label in the group column forms a group, including labels that are
/// not known configuration ids.
pub fn configuration_averages<S: AsRef<str>>(
    table: &DataTable,
    group_key: &str,
    columns: &[S],
) -> AnalysisResult<Vec<GroupAverage>> {
    let values = load_metrics(table, columns)?;
    let grouped = GroupedTable::by_group(table, group_key)?;

    let averages = grouped
        .groups()
        .into_iter()
        .map(|group| {
            let rows = grouped.group_rows(group);
            let columns = values
                .iter()
                .map(|(column, values)| {
                    let stats = SummaryStats::from_data(&sample(values, rows));
                    ColumnAverage {
                        column: column.clone(),
                        mean: stats.mean,
                        variance: stats.sample_variance,
                        count: stats.count,
                    }
                })
                .collect();

            GroupAverage {
                group: group.to_string(),
                rows: rows.len(),
                columns,
            }
        })
        .collect();

    Ok(averages)
}
