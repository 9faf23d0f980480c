//! CLI argument definitions for CSV generation.

use clap::Args;
use std::path::PathBuf;

/// Arguments selecting and tuning a pipeline run.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Built-in pipeline to run (see the `list` command)
    #[arg(long, short = 'p', conflicts_with = "schema", required_unless_present = "schema")]
    pub pipeline: Option<String>,

    /// Path to a pipeline schema YAML file
    #[arg(long, short = 's')]
    pub schema: Option<PathBuf>,

    /// Random seed override (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Date suffix override for tables without variants
    #[arg(long)]
    pub file_date: Option<String>,

    /// Tables to write (comma-separated, empty = all). Dependencies are still generated.
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Validate the pipeline and print the generation plan without writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// CSV-specific generate arguments.
#[derive(Args, Clone, Debug)]
pub struct CSVPopulateArgs {
    /// Output directory for CSV files (created if absent)
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Omit the header row
    #[arg(long)]
    pub no_header: bool,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}
