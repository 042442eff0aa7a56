//! cmx-analyze - compare test generation configurations from a results CSV
//!
//! # Usage
//!
//! ```bash
//! cmx-analyze --input statistics.csv --output-dir results
//! cmx-analyze --config analysis.toml
//! ```
//!
//! Flags override values from the configuration file. Set `RUST_LOG` to
//! change the log level (default `info`).

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cmx_analysis::{run, AnalysisConfig};

#[derive(Parser)]
#[command(name = "cmx-analyze")]
#[command(about = "Compare DEFAULT, CMX and COVERAGE configurations from a results table")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Results table (.csv or .tsv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the report tables
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    }
    .with_overrides(args.input, args.output_dir);

    let summary = run(&config)?;
    for report in &summary.reports {
        info!("{} ({} rows)", report.path.display(), report.rows);
    }

    Ok(())
}
