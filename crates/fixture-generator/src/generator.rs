//! Table generator expanding a row template into rows.

use crate::generators::generate_value;
use fixture_core::{FixtureValue, GeneratedTable, KeyRef, Locale, SchemaError, TableTemplate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A referenced key pool was captured but holds no values
    #[error("Empty candidate set for reference {0}")]
    EmptyCandidateSet(KeyRef),

    /// A reference was evaluated before its parent was generated
    #[error("No key pool captured for reference {0}")]
    MissingKeyPool(KeyRef),

    /// A reference names a table or column that does not exist
    #[error("Table '{table}' references unknown key {key}")]
    UnknownReference { table: String, key: KeyRef },

    /// Tables reference each other in a cycle
    #[error("Dependency cycle between tables: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    /// An inline choice list has nothing to pick from
    #[error("Cannot choose from an empty value list")]
    EmptyChoiceList,

    /// A timestamp range has no valid instant
    #[error("Invalid timestamp range {start_year}..={end_year}")]
    TimestampRange { start_year: i32, end_year: i32 },

    /// A timestamp could not be rendered with its format
    #[error("Failed to format timestamp with '{0}'")]
    TimestampFormat(String),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),
}

/// Snapshots of parent key sets, keyed by `table.column`.
///
/// A pool is captured once its parent table (all variants) has been
/// generated. Later changes to the parent are not reflected.
#[derive(Debug, Clone, Default)]
pub struct KeyPools {
    pools: HashMap<KeyRef, Vec<FixtureValue>>,
}

impl KeyPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a candidate set supplied by the caller.
    pub fn insert(&mut self, key: KeyRef, values: Vec<FixtureValue>) {
        self.pools.insert(key, values);
    }

    /// Capture the unique values of `key.column` across `tables`.
    ///
    /// Returns the pool size.
    pub fn capture(
        &mut self,
        key: &KeyRef,
        tables: &[GeneratedTable],
    ) -> Result<usize, GeneratorError> {
        let values = GeneratedTable::unique_values_across(tables, &key.column).ok_or_else(|| {
            GeneratorError::UnknownReference {
                table: key.table.clone(),
                key: key.clone(),
            }
        })?;
        let size = values.len();
        debug!("Captured key pool {} with {} values", key, size);
        self.pools.insert(key.clone(), values);
        Ok(size)
    }

    /// Get a pool if one was captured.
    pub fn get(&self, key: &KeyRef) -> Option<&[FixtureValue]> {
        self.pools.get(key).map(|v| v.as_slice())
    }

    /// Get a non-empty candidate set, failing fast otherwise.
    pub fn candidates(&self, key: &KeyRef) -> Result<&[FixtureValue], GeneratorError> {
        let pool = self
            .get(key)
            .ok_or_else(|| GeneratorError::MissingKeyPool(key.clone()))?;
        if pool.is_empty() {
            return Err(GeneratorError::EmptyCandidateSet(key.clone()));
        }
        Ok(pool)
    }

}

/// Generator that produces deterministic rows from row templates.
///
/// The random source is owned by the generator and passed in at
/// construction, so two generators built from the same seed produce the
/// same tables when fed the same templates in the same order.
pub struct TableGenerator<R = StdRng> {
    /// Random source for every rule evaluation
    rng: R,
    /// Locale of the fake-data corpus
    locale: Locale,
}

impl TableGenerator<StdRng> {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TableGenerator<R> {
    /// Create a generator around an existing random source.
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            locale: Locale::default(),
        }
    }

    /// Set the locale of the fake-data corpus.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Generate `template.records` rows.
    pub fn generate(
        &mut self,
        template: &TableTemplate,
        pools: &KeyPools,
    ) -> Result<GeneratedTable, GeneratorError> {
        self.generate_rows(template, template.records, pools)
    }

    /// Generate exactly `count` rows, columns in declaration order.
    ///
    /// The template and every referenced pool are checked before the first
    /// row, so an invalid rule or a missing or empty dependency fails
    /// without producing any output.
    pub fn generate_rows(
        &mut self,
        template: &TableTemplate,
        count: usize,
        pools: &KeyPools,
    ) -> Result<GeneratedTable, GeneratorError> {
        template.validate()?;
        for key in template.references() {
            pools.candidates(&key)?;
        }
        let overrides = resolve_overrides(template)?;

        let columns = template
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let mut table = GeneratedTable::new(&template.name, columns);

        for _ in 0..count {
            let mut row = self.evaluate_row(template, pools)?;
            for rule in &overrides {
                rule.apply(&mut row);
            }
            table.push_row(row);
        }

        debug!("Generated {} rows for table '{}'", table.len(), template.name);
        Ok(table)
    }

    /// Evaluate every rule once, in declaration order.
    fn evaluate_row(
        &mut self,
        template: &TableTemplate,
        pools: &KeyPools,
    ) -> Result<Vec<FixtureValue>, GeneratorError> {
        template
            .columns
            .iter()
            .map(|column| generate_value(&column.generator, &mut self.rng, self.locale, pools))
            .collect()
    }
}

/// Override with column names resolved to positions.
struct ResolvedOverride {
    when_idx: usize,
    equals: FixtureValue,
    set_idx: usize,
    value: FixtureValue,
}

impl ResolvedOverride {
    fn apply(&self, row: &mut [FixtureValue]) {
        if row[self.when_idx] == self.equals {
            row[self.set_idx] = self.value.clone();
        }
    }
}

fn resolve_overrides(template: &TableTemplate) -> Result<Vec<ResolvedOverride>, GeneratorError> {
    let index = |column: &str| {
        template
            .column_index(column)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: template.name.clone(),
                column: column.to_string(),
            })
    };

    template
        .overrides
        .iter()
        .map(|rule| -> Result<ResolvedOverride, GeneratorError> {
            Ok(ResolvedOverride {
                when_idx: index(&rule.when.column)?,
                equals: FixtureValue::try_from(&rule.when.equals)?,
                set_idx: index(&rule.set.column)?,
                value: FixtureValue::try_from(&rule.set.value)?,
            })
        })
        .collect()
}
