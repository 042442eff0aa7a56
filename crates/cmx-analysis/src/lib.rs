//! cmx-analysis - Comparing test generation configurations
//!
//! Reads a results table with one row per run (configuration id, target
//! class, coverage metrics), and compares the configurations with the
//! rank-based statistics of `cmx-stats`:
//!
//! - **Per class**: [`compare_groups`] compares two configurations on every
//!   target class present under both, reporting means, Vargha-Delaney A₁₂
//!   and the Mann-Whitney p-value
//! - **Overall**: [`overall_comparison`] does the same over all rows of
//!   each configuration
//! - **Omnibus**: [`omnibus`] runs Kruskal-Wallis across configurations
//! - **Averages**: [`configuration_averages`] gives per-configuration means
//!   and variances
//!
//! [`run`] ties these together from an [`AnalysisConfig`] and writes one
//! CSV table per report.
//!
//! # Example
//!
//! ```no_run
//! use cmx_analysis::{run, AnalysisConfig};
//!
//! let config = AnalysisConfig {
//!     input: "statistics.csv".into(),
//!     output_dir: "results".into(),
//!     ..AnalysisConfig::default()
//! };
//! let summary = run(&config)?;
//! println!("{} rows, {} reports", summary.rows_read, summary.reports.len());
//! # Ok::<(), cmx_analysis::AnalysisError>(())
//! ```

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod error;
pub mod grouping;
pub mod omnibus;
pub mod pipeline;
pub mod report;

pub use aggregate::*;
pub use compare::*;
pub use config::*;
pub use error::{AnalysisError, AnalysisResult};
pub use grouping::*;
pub use omnibus::*;
pub use pipeline::*;
pub use report::*;
