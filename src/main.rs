//! Command-line interface for survey-fixtures
//!
//! # Usage Examples
//!
//! ```bash
//! # List the built-in pipelines
//! survey-fixtures list
//!
//! # Generate the schools survey inputs into ./out
//! survey-fixtures generate --pipeline schools --output-dir out
//!
//! # Same tables, different data
//! survey-fixtures generate --pipeline schools --output-dir out --seed 1234
//!
//! # Custom schema, show the plan only
//! survey-fixtures generate --schema pipeline.yaml --dry-run
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see per-table progress.

use clap::{Parser, Subcommand};
use fixture_populate_csv::CSVPopulateArgs;
use survey_fixtures::{run_generate, GenerateOutcome, BUILTIN_PIPELINES};

#[derive(Parser)]
#[command(name = "survey-fixtures")]
#[command(about = "Generate deterministic synthetic health-survey input files")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CSV files from a built-in pipeline or a schema file
    Generate {
        #[command(flatten)]
        args: CSVPopulateArgs,
    },

    /// List the built-in pipelines and their tables
    List,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => match run_generate(&args)? {
            GenerateOutcome::Planned(plan) => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
            GenerateOutcome::Written(metrics) => {
                for m in &metrics {
                    println!("{}\t{} rows", m.path.display(), m.rows_written);
                }
            }
        },
        Commands::List => {
            for pipeline in BUILTIN_PIPELINES {
                let schema = pipeline.schema()?;
                println!("{}\t{}", pipeline.name, pipeline.description);
                for table in &schema.tables {
                    println!("  {} ({} rows)", table.name, table.records);
                }
            }
        }
    }

    Ok(())
}
