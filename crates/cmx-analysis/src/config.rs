//! Configuration for cmx-analysis
//!
//! Names the input table, the columns to read and the configurations to
//! compare. Every field has a default matching the layout of the
//! test-generation statistics file, so an empty TOML file is a valid
//! configuration.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Experimental configuration a row was produced under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigurationId {
    /// Stock search settings
    Default,
    /// Completely mapped crossover
    Cmx,
    /// Coverage-only fitness
    Coverage,
}

impl ConfigurationId {
    /// All known configurations
    pub const ALL: [ConfigurationId; 3] = [
        ConfigurationId::Default,
        ConfigurationId::Cmx,
        ConfigurationId::Coverage,
    ];

    /// Label used in the results table
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationId::Default => "DEFAULT",
            ConfigurationId::Cmx => "CMX",
            ConfigurationId::Coverage => "COVERAGE",
        }
    }

    /// Lowercase form for file names
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigurationId {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigurationId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AnalysisError::InvalidConfig(format!("unknown configuration id '{}'", s))
            })
    }
}

/// An ordered pair of configurations; effect sizes are of `a` against `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub a: ConfigurationId,
    pub b: ConfigurationId,
}

impl Comparison {
    pub fn new(a: ConfigurationId, b: ConfigurationId) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_vs_{}", self.a, self.b)
    }
}

/// Analysis run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Results table to read
    pub input: PathBuf,
    /// Directory for the output tables
    pub output_dir: PathBuf,
    /// Column holding the configuration id
    pub group_column: String,
    /// Column holding the target class
    pub subject_column: String,
    /// Metrics compared between configurations
    pub metrics: Vec<String>,
    /// Columns averaged per configuration
    pub aggregate_columns: Vec<String>,
    /// Configurations entering the Kruskal-Wallis test
    pub groups: Vec<ConfigurationId>,
    /// Pairwise comparisons, per class and overall
    pub comparisons: Vec<Comparison>,
    /// Significance level used in log summaries
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let metrics: Vec<String> = ["Coverage", "BranchCoverage", "CBranchCoverage"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut aggregate_columns = metrics.clone();
        aggregate_columns.extend(
            [
                "Total_Branches",
                "Covered_Branches",
                "Covered_Branches_Real",
                "Total_Goals",
                "Covered_Goals",
            ]
            .iter()
            .map(|s| s.to_string()),
        );

        Self {
            input: PathBuf::from("statistics.csv"),
            output_dir: PathBuf::from("results"),
            group_column: "configuration_id".to_string(),
            subject_column: "TARGET_CLASS".to_string(),
            metrics,
            aggregate_columns,
            groups: ConfigurationId::ALL.to_vec(),
            comparisons: vec![
                Comparison::new(ConfigurationId::Cmx, ConfigurationId::Default),
                Comparison::new(ConfigurationId::Cmx, ConfigurationId::Coverage),
            ],
            alpha: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> AnalysisResult<Self> {
        toml::from_str(toml_str).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> AnalysisResult<String> {
        toml::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Replace the input table and output directory where given
    pub fn with_overrides(mut self, input: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.group_column.is_empty() || self.subject_column.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "group_column and subject_column must be set".to_string(),
            ));
        }

        if self.group_column == self.subject_column {
            return Err(AnalysisError::InvalidConfig(
                "group_column and subject_column must differ".to_string(),
            ));
        }

        if self.metrics.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "at least one metric is required".to_string(),
            ));
        }

        // Report file names lowercase the metric, so metrics must stay
        // distinct after lowercasing
        let mut seen_metrics = HashSet::new();
        for metric in &self.metrics {
            if !seen_metrics.insert(metric.to_lowercase()) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "metric '{}' is listed twice (names are compared case-insensitively)",
                    metric
                )));
            }
        }

        let mut seen_comparisons = HashSet::new();
        for comparison in &self.comparisons {
            if comparison.a == comparison.b {
                return Err(AnalysisError::InvalidConfig(format!(
                    "comparison {} compares a configuration with itself",
                    comparison
                )));
            }
            if !seen_comparisons.insert((comparison.a, comparison.b)) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "comparison {} is listed twice",
                    comparison
                )));
            }
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnalysisError::InvalidConfig(
                "alpha must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.group_column, "configuration_id");
        assert_eq!(config.subject_column, "TARGET_CLASS");
        assert_eq!(config.metrics.len(), 3);
        assert_eq!(config.aggregate_columns.len(), 8);
        assert_eq!(config.comparisons[0].to_string(), "CMX_vs_DEFAULT");
    }

    #[test]
    fn test_configuration_id_parsing() {
        assert_eq!("CMX".parse::<ConfigurationId>().unwrap(), ConfigurationId::Cmx);
        assert_eq!(
            " default ".parse::<ConfigurationId>().unwrap(),
            ConfigurationId::Default
        );
        assert!("RANDOM".parse::<ConfigurationId>().is_err());
        assert_eq!(ConfigurationId::Coverage.slug(), "coverage");
    }

    #[test]
    fn test_partial_toml() {
        let config = AnalysisConfig::from_toml(
            r#"
input = "data/statistics.csv"
metrics = ["Coverage"]
comparisons = [{ a = "COVERAGE", b = "DEFAULT" }]
"#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("data/statistics.csv"));
        assert_eq!(config.metrics, vec!["Coverage"]);
        assert_eq!(
            config.comparisons,
            vec![Comparison::new(ConfigurationId::Coverage, ConfigurationId::Default)]
        );
        // Untouched fields keep their defaults
        assert_eq!(config.group_column, "configuration_id");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AnalysisConfig::default();
        let parsed = AnalysisConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AnalysisConfig::from_toml("groups = [\"RANDOM\"]"),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_self_comparison() {
        let mut config = AnalysisConfig::default();
        config.comparisons = vec![Comparison::new(ConfigurationId::Cmx, ConfigurationId::Cmx)];
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_metrics() {
        let mut config = AnalysisConfig::default();
        config.metrics.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_comparison() {
        let mut config = AnalysisConfig::default();
        config
            .comparisons
            .push(Comparison::new(ConfigurationId::Cmx, ConfigurationId::Default));
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(ref m)) if m.contains("CMX_vs_DEFAULT")
        ));

        // The reversed pair writes different files and is allowed
        config.comparisons = vec![
            Comparison::new(ConfigurationId::Cmx, ConfigurationId::Default),
            Comparison::new(ConfigurationId::Default, ConfigurationId::Cmx),
        ];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_metrics_equal_ignoring_case() {
        let mut config = AnalysisConfig::default();
        config.metrics = vec!["Coverage".to_string(), "coverage".to_string()];
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(ref m)) if m.contains("coverage")
        ));
    }

    #[test]
    fn test_overrides_replace_loaded_values() {
        let config = AnalysisConfig::from_toml(
            r#"
input = "data/statistics.csv"
output_dir = "data/results"
metrics = ["Coverage"]
"#,
        )
        .unwrap();

        let merged = config
            .clone()
            .with_overrides(Some(PathBuf::from("other.csv")), None);
        assert_eq!(merged.input, PathBuf::from("other.csv"));
        assert_eq!(merged.output_dir, PathBuf::from("data/results"));
        assert_eq!(merged.metrics, vec!["Coverage"]);

        let merged = config
            .clone()
            .with_overrides(None, Some(PathBuf::from("out")));
        assert_eq!(merged.input, PathBuf::from("data/statistics.csv"));
        assert_eq!(merged.output_dir, PathBuf::from("out"));

        assert_eq!(config.clone().with_overrides(None, None), config);
    }
}
