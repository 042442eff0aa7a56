//! Test fixture loading utilities

use std::path::{Path, PathBuf};

use cmx_analysis::AnalysisConfig;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Default configuration reading the results fixture and writing to `output_dir`
pub fn fixture_config(output_dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        input: fixture_path("statistics.csv"),
        output_dir: output_dir.to_path_buf(),
        ..AnalysisConfig::default()
    }
}

/// Read a written report as header and rows of raw cells
pub fn read_report(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let contents = std::fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to read report: {}", path.display()));
    let mut lines = contents
        .lines()
        .map(|line| line.split(',').map(str::to_string).collect::<Vec<_>>());
    let header = lines.next().unwrap_or_default();
    (header, lines.collect())
}
