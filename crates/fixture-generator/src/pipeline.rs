//! Dependency-ordered orchestration of table generators.
//!
//! A table depends on every table its `reference` rules point at. The
//! pipeline generates tables in topological order (declaration order breaks
//! ties), captures the key pools dependents need once a parent and all of
//! its variants are done, and hands those snapshots to the dependents.

use crate::generator::{GeneratorError, KeyPools, TableGenerator};
use fixture_core::{FixtureSchema, GeneratedTable, KeyRef, Locale, TableTemplate};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// One step of a generation plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStep {
    /// Table name
    pub table: String,
    /// Rows per variant
    pub records: usize,
    /// Variant labels (empty means one file with the default date)
    pub variants: Vec<String>,
    /// Parent tables that must be generated first
    pub depends_on: Vec<String>,
    /// Key pools captured from this table for dependents
    pub provides: Vec<String>,
}

/// Ordered generation plan, printable as JSON for dry runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPlan {
    pub seed: u64,
    pub locale: Locale,
    pub file_date: String,
    pub steps: Vec<PlanStep>,
}

/// Tables produced by a pipeline run, in generation order.
///
/// A table with variants appears once per variant.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Date suffix for tables without a variant
    pub file_date: String,
    /// Generated tables
    pub tables: Vec<GeneratedTable>,
}

impl PipelineOutput {
    /// All generated tables (every variant) with the given name.
    pub fn tables_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a GeneratedTable> {
        self.tables.iter().filter(move |t| t.name == name)
    }

    /// First generated table with the given name.
    pub fn get(&self, name: &str) -> Option<&GeneratedTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Total rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(GeneratedTable::len).sum()
    }
}

/// A validated, ordered pipeline ready to run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema: FixtureSchema,
    /// Indices into `schema.tables` in generation order
    order: Vec<usize>,
}

impl Pipeline {
    /// Validate, resolve references and plan the generation order.
    ///
    /// The schema is validated again since builder overrides such as
    /// `with_file_date` bypass the checks done at load time.
    pub fn new(schema: FixtureSchema) -> Result<Self, GeneratorError> {
        schema.validate()?;
        check_references(&schema)?;
        let order = topological_order(&schema)?;
        Ok(Self { schema, order })
    }

    pub fn schema(&self) -> &FixtureSchema {
        &self.schema
    }

    /// Table names in generation order.
    pub fn order(&self) -> Vec<&str> {
        self.ordered_tables().map(|t| t.name.as_str()).collect()
    }

    fn ordered_tables(&self) -> impl Iterator<Item = &TableTemplate> {
        self.order.iter().map(|&idx| &self.schema.tables[idx])
    }

    /// Every key referenced anywhere in the schema, in first-use order.
    fn referenced_keys(&self) -> Vec<KeyRef> {
        let mut keys: Vec<KeyRef> = Vec::new();
        for table in &self.schema.tables {
            for key in table.references() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Describe what a run would do.
    pub fn plan(&self) -> GenerationPlan {
        let keys = self.referenced_keys();
        let steps = self
            .ordered_tables()
            .map(|table| PlanStep {
                table: table.name.clone(),
                records: table.records,
                variants: table.variants.clone(),
                depends_on: table.dependencies().into_iter().map(String::from).collect(),
                provides: keys
                    .iter()
                    .filter(|k| k.table == table.name)
                    .map(|k| k.column.clone())
                    .collect(),
            })
            .collect();

        GenerationPlan {
            seed: self.schema.seed,
            locale: self.schema.locale,
            file_date: self.schema.file_date.clone(),
            steps,
        }
    }

    /// Run with a generator seeded from the schema.
    pub fn run(&self) -> Result<PipelineOutput, GeneratorError> {
        let mut generator = TableGenerator::new(self.schema.seed).with_locale(self.schema.locale);
        self.run_with(&mut generator)
    }

    /// Run with a caller-provided generator.
    pub fn run_with<R: Rng>(
        &self,
        generator: &mut TableGenerator<R>,
    ) -> Result<PipelineOutput, GeneratorError> {
        let keys = self.referenced_keys();
        let mut pools = KeyPools::new();
        let mut tables = Vec::new();

        for template in self.ordered_tables() {
            let generated = generate_variants(generator, template, &pools)?;

            for key in keys.iter().filter(|k| k.table == template.name) {
                pools.capture(key, &generated)?;
            }

            tables.extend(generated);
        }

        let output = PipelineOutput {
            file_date: self.schema.file_date.clone(),
            tables,
        };
        info!(
            "Generated {} tables ({} rows) with seed {}",
            output.tables.len(),
            output.total_rows(),
            self.schema.seed
        );
        Ok(output)
    }
}

/// Generate a table once, or once per variant label.
fn generate_variants<R: Rng>(
    generator: &mut TableGenerator<R>,
    template: &TableTemplate,
    pools: &KeyPools,
) -> Result<Vec<GeneratedTable>, GeneratorError> {
    if template.variants.is_empty() {
        return Ok(vec![generator.generate(template, pools)?]);
    }

    template
        .variants
        .iter()
        .map(|variant| -> Result<GeneratedTable, GeneratorError> {
            debug!("Generating table '{}' for {}", template.name, variant);
            Ok(generator.generate(template, pools)?.with_variant(variant))
        })
        .collect()
}

/// Every reference must name an existing table and column.
fn check_references(schema: &FixtureSchema) -> Result<(), GeneratorError> {
    for table in &schema.tables {
        for key in table.references() {
            let known = schema
                .get_table(&key.table)
                .is_some_and(|parent| parent.get_column(&key.column).is_some());
            if !known {
                return Err(GeneratorError::UnknownReference {
                    table: table.name.clone(),
                    key,
                });
            }
        }
    }
    Ok(())
}

/// Kahn's algorithm; the earliest declared ready table goes first.
fn topological_order(schema: &FixtureSchema) -> Result<Vec<usize>, GeneratorError> {
    let tables = &schema.tables;
    let deps: Vec<Vec<usize>> = tables
        .iter()
        .map(|table| {
            table
                .dependencies()
                .into_iter()
                .filter_map(|name| tables.iter().position(|t| t.name == name))
                .collect()
        })
        .collect();

    let mut done = vec![false; tables.len()];
    let mut order = Vec::with_capacity(tables.len());

    while order.len() < tables.len() {
        let ready = (0..tables.len()).find(|&i| !done[i] && deps[i].iter().all(|&d| done[d]));
        match ready {
            Some(idx) => {
                done[idx] = true;
                order.push(idx);
            }
            None => {
                let stuck = (0..tables.len())
                    .filter(|&i| !done[i])
                    .map(|i| tables[i].name.clone())
                    .collect();
                return Err(GeneratorError::DependencyCycle(stuck));
            }
        }
    }

    Ok(order)
}
