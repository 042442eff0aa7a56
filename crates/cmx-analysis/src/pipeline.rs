//! End-to-end analysis run: read the results table, compute every report,
//! write the report tables

use std::path::PathBuf;

use tracing::info;

use cmx_io::{open_file, DataTable, IoError};

use crate::aggregate::configuration_averages;
use crate::compare::{compare_groups, overall_comparison, ComparisonResult};
use crate::config::{AnalysisConfig, Comparison};
use crate::error::AnalysisResult;
use crate::omnibus::omnibus;
use crate::report::{
    subject_report_name, write_averages, write_omnibus, write_overall, write_subject_comparisons,
    ReportFile, AVERAGES_FILE, KRUSKAL_FILE, OVERALL_FILE,
};

/// What a run read and wrote
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub input: PathBuf,
    pub rows_read: usize,
    pub reports: Vec<ReportFile>,
}

impl RunSummary {
    /// Data rows written across all reports
    pub fn rows_written(&self) -> usize {
        self.reports.iter().map(|r| r.rows).sum()
    }
}

/// Run the full analysis described by `config`
pub fn run(config: &AnalysisConfig) -> AnalysisResult<RunSummary> {
    config.validate()?;

    let reader = open_file(&config.input.to_string_lossy())?;
    let table = reader.read_table()?;
    info!(
        "Read {} rows and {} columns from {} ({})",
        table.num_rows(),
        table.num_columns(),
        reader.path().unwrap_or("input"),
        reader.format_name()
    );

    let reports = analyze(&table, config)?;
    info!(
        "Wrote {} reports to {}",
        reports.len(),
        config.output_dir.display()
    );

    Ok(RunSummary {
        input: config.input.clone(),
        rows_read: table.num_rows(),
        reports,
    })
}

/// Compute and write every report for an already loaded table
///
/// Nothing is written unless every configured column exists and the metric
/// and averaged columns are numeric.
pub fn analyze(table: &DataTable, config: &AnalysisConfig) -> AnalysisResult<Vec<ReportFile>> {
    check_columns(table, config)?;

    let out = &config.output_dir;
    let mut reports = Vec::new();

    let averages =
        configuration_averages(table, &config.group_column, &config.aggregate_columns)?;
    for average in &averages {
        info!("{}: {} rows", average.group, average.rows);
        for column in &average.columns {
            info!(
                "  {}: mean {:.4}, variance {:.4}",
                column.column, column.mean, column.variance
            );
        }
    }
    reports.push(write_averages(
        &out.join(AVERAGES_FILE),
        &config.group_column,
        &averages,
    )?);

    let mut overall = Vec::new();
    for comparison in &config.comparisons {
        let results = compare_groups(
            table,
            &config.group_column,
            &config.subject_column,
            &config.metrics,
            comparison.a,
            comparison.b,
        )?;

        for metric in &config.metrics {
            let path = out.join(subject_report_name(comparison, metric));
            let report = write_subject_comparisons(
                &path,
                &config.subject_column,
                comparison,
                metric,
                &results,
            )?;
            log_subject_summary(comparison, metric, &results, config.alpha);
            reports.push(report);
        }

        overall.extend(overall_comparison(
            table,
            &config.group_column,
            &config.metrics,
            comparison.a,
            comparison.b,
        )?);
    }

    for result in &overall {
        info!(
            "{} vs {} {}: A12 {:.4} ({}), p {:.4}",
            result.group_a,
            result.group_b,
            result.metric,
            result.effect_size,
            result.magnitude(),
            result.p_value
        );
    }
    reports.push(write_overall(&out.join(OVERALL_FILE), &overall)?);

    let omnibus_results = omnibus(table, &config.group_column, &config.metrics, &config.groups)?;
    for result in &omnibus_results {
        info!(
            "Kruskal-Wallis {}: H {:.4}, p {:.4}",
            result.metric, result.h_statistic, result.p_value
        );
    }
    reports.push(write_omnibus(&out.join(KRUSKAL_FILE), &omnibus_results)?);

    Ok(reports)
}

/// Fail with `ColumnNotFound` if a configured column is absent, or
/// `TypeMismatch` if a metric or averaged column is not numeric
fn check_columns(table: &DataTable, config: &AnalysisConfig) -> AnalysisResult<()> {
    for key in [&config.group_column, &config.subject_column] {
        if !table.has_column(key) {
            return Err(IoError::ColumnNotFound(key.clone()).into());
        }
    }

    for name in config.metrics.iter().chain(&config.aggregate_columns) {
        let dtype = table.column(name)?.dtype();
        if !dtype.is_numeric() {
            return Err(IoError::TypeMismatch {
                expected: format!("numeric column '{}'", name),
                actual: dtype.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn log_subject_summary(
    comparison: &Comparison,
    metric: &str,
    results: &[ComparisonResult],
    alpha: f64,
) {
    let compared: Vec<&ComparisonResult> = results.iter().filter(|r| r.metric == metric).collect();
    let significant: Vec<&&ComparisonResult> =
        compared.iter().filter(|r| r.is_significant(alpha)).collect();
    let favoring_a = significant.iter().filter(|r| r.effect_size > 0.5).count();

    info!(
        "{} {}: {} classes, {} significant at {} ({} favoring {})",
        comparison,
        metric,
        compared.len(),
        significant.len(),
        alpha,
        favoring_a,
        comparison.a
    );
}
