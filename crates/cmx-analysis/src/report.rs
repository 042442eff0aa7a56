//! Writing analysis results as CSV tables

use std::path::{Path, PathBuf};

use cmx_io::{Cell, CsvTableWriter};

use crate::aggregate::GroupAverage;
use crate::compare::ComparisonResult;
use crate::config::Comparison;
use crate::error::AnalysisResult;
use crate::omnibus::OmnibusResult;

/// File name of the averages table
pub const AVERAGES_FILE: &str = "averages.csv";
/// File name of the whole-configuration comparison table
pub const OVERALL_FILE: &str = "overall_comparisons.csv";
/// File name of the Kruskal-Wallis table
pub const KRUSKAL_FILE: &str = "kruskal_wallis.csv";

/// A written report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub path: PathBuf,
    /// Data rows, excluding the header
    pub rows: usize,
}

/// File name for the per-class table of one comparison and metric
///
/// `CMX` vs `DEFAULT` on `BranchCoverage` becomes
/// `cmx_vs_default_branchcoverage.csv`.
pub fn subject_report_name(comparison: &Comparison, metric: &str) -> String {
    format!(
        "{}_vs_{}_{}.csv",
        comparison.a.slug(),
        comparison.b.slug(),
        metric.to_lowercase()
    )
}

/// Write per-configuration averages
///
/// Columns: the group key, `rows`, then `<column>_mean` and
/// `<column>_variance` for each averaged column.
pub fn write_averages(
    path: &Path,
    group_key: &str,
    averages: &[GroupAverage],
) -> AnalysisResult<ReportFile> {
    let columns: Vec<&str> = averages
        .first()
        .map(|a| a.columns.iter().map(|c| c.column.as_str()).collect())
        .unwrap_or_default();

    let mut header = vec![group_key.to_string(), "rows".to_string()];
    for column in &columns {
        header.push(format!("{}_mean", column));
        header.push(format!("{}_variance", column));
    }

    let mut writer = CsvTableWriter::create(path, &header)?;
    for average in averages {
        let mut row = vec![Cell::from(average.group.as_str()), Cell::from(average.rows)];
        for column in &average.columns {
            row.push(Cell::from(column.mean));
            row.push(Cell::from(column.variance));
        }
        writer.write_row(&row)?;
    }
    finish(writer)
}

/// Write the per-class results of one comparison for one metric
///
/// Column names follow the `<metric>_<A>`, `<A>_vs_<B>`, `P_<metric>`,
/// `Effect_<metric>` layout. Results for other metrics are ignored.
pub fn write_subject_comparisons(
    path: &Path,
    subject_key: &str,
    comparison: &Comparison,
    metric: &str,
    results: &[ComparisonResult],
) -> AnalysisResult<ReportFile> {
    let header = [
        subject_key.to_string(),
        format!("{}_{}", metric, comparison.a),
        format!("{}_{}", metric, comparison.b),
        comparison.to_string(),
        format!("P_{}", metric),
        format!("Effect_{}", metric),
        format!("Magnitude_{}", metric),
    ];

    let mut writer = CsvTableWriter::create(path, &header)?;
    for result in results.iter().filter(|r| r.metric == metric) {
        writer.write_row(&[
            Cell::from(result.subject.clone().unwrap_or_default()),
            Cell::from(result.mean_a),
            Cell::from(result.mean_b),
            Cell::from(result.difference),
            Cell::from(result.p_value),
            Cell::from(result.effect_size),
            Cell::from(result.magnitude().as_str()),
        ])?;
    }
    finish(writer)
}

/// Write whole-configuration comparisons, one row per pair and metric
pub fn write_overall(path: &Path, results: &[ComparisonResult]) -> AnalysisResult<ReportFile> {
    let header = [
        "group_a",
        "group_b",
        "metric",
        "mean_a",
        "mean_b",
        "difference",
        "effect_size",
        "magnitude",
        "p_value",
        "n_a",
        "n_b",
    ];

    let mut writer = CsvTableWriter::create(path, &header)?;
    for result in results {
        writer.write_row(&[
            Cell::from(result.group_a.as_str()),
            Cell::from(result.group_b.as_str()),
            Cell::from(result.metric.as_str()),
            Cell::from(result.mean_a),
            Cell::from(result.mean_b),
            Cell::from(result.difference),
            Cell::from(result.effect_size),
            Cell::from(result.magnitude().as_str()),
            Cell::from(result.p_value),
            Cell::from(result.n_a),
            Cell::from(result.n_b),
        ])?;
    }
    finish(writer)
}

/// Write Kruskal-Wallis results, one row per metric
pub fn write_omnibus(path: &Path, results: &[OmnibusResult]) -> AnalysisResult<ReportFile> {
    let header = ["metric", "groups", "h_statistic", "degrees_of_freedom", "p_value"];

    let mut writer = CsvTableWriter::create(path, &header)?;
    for result in results {
        let groups: Vec<&str> = result.groups.iter().map(|g| g.as_str()).collect();
        writer.write_row(&[
            Cell::from(result.metric.as_str()),
            Cell::from(groups.join(" ")),
            Cell::from(result.h_statistic),
            Cell::from(result.degrees_of_freedom),
            Cell::from(result.p_value),
        ])?;
    }
    finish(writer)
}

fn finish(writer: CsvTableWriter) -> AnalysisResult<ReportFile> {
    let path = writer.path().to_path_buf();
    let rows = writer.finish()?;
    Ok(ReportFile { path, rows })
}
