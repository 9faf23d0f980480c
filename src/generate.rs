//! Generate command handler.

use anyhow::Context;
use fixture_core::FixtureSchema;
use fixture_generator::{GenerationPlan, Pipeline};
use fixture_populate_csv::{CSVPopulateArgs, CSVPopulator, CommonPopulateArgs, PopulateMetrics};

use crate::builtin;

/// Result of a generate command.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// Dry run: the plan that would have been executed
    Planned(GenerationPlan),
    /// One entry per file written
    Written(Vec<PopulateMetrics>),
}

/// Load the selected schema and apply command-line overrides.
pub fn load_schema(args: &CommonPopulateArgs) -> anyhow::Result<FixtureSchema> {
    let mut schema = match (&args.pipeline, &args.schema) {
        (_, Some(path)) => FixtureSchema::from_file(path)
            .with_context(|| format!("Failed to load pipeline schema from {path:?}"))?,
        (Some(name), None) => {
            let pipeline = builtin::find(name).with_context(|| {
                format!(
                    "Unknown pipeline '{name}' (available: {})",
                    builtin::names().join(", ")
                )
            })?;
            pipeline
                .schema()
                .with_context(|| format!("Built-in pipeline '{name}' is invalid"))?
        }
        (None, None) => anyhow::bail!("Either --pipeline or --schema is required"),
    };

    if let Some(seed) = args.seed {
        schema = schema.with_seed(seed);
    }
    if let Some(file_date) = &args.file_date {
        schema = schema.with_file_date(file_date.clone());
    }
    Ok(schema)
}

/// Run the generate command: plan, generate every table, write the selected ones.
pub fn run_generate(args: &CSVPopulateArgs) -> anyhow::Result<GenerateOutcome> {
    let schema = load_schema(&args.common)?;

    for name in &args.common.tables {
        schema
            .table(name)
            .with_context(|| format!("Cannot select table '{name}'"))?;
    }

    let pipeline = Pipeline::new(schema).context("Failed to plan pipeline")?;

    if args.common.dry_run {
        tracing::info!("[DRY-RUN] Generation order: {:?}", pipeline.order());
        return Ok(GenerateOutcome::Planned(pipeline.plan()));
    }

    tracing::info!(
        "Generating {} tables (seed={})",
        pipeline.order().len(),
        pipeline.schema().seed
    );
    let output = pipeline.run().context("Failed to generate tables")?;

    let populator = CSVPopulator::new(&args.output_dir).with_header(!args.no_header);
    let selected = output
        .tables
        .iter()
        .filter(|t| args.common.tables.is_empty() || args.common.tables.contains(&t.name));

    let mut metrics = Vec::new();
    for table in selected {
        let written = populator
            .populate(table, &output.file_date)
            .with_context(|| format!("Failed to write table '{}'", table.name))?;
        metrics.push(written);
    }

    tracing::info!(
        "Wrote {} files to {}",
        metrics.len(),
        populator.output_dir().display()
    );
    Ok(GenerateOutcome::Written(metrics))
}
