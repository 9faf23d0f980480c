//! Pipeline schema definitions for survey-fixtures.
//!
//! A pipeline is a list of table templates. Each template is an ordered list
//! of columns, and each column carries a [`ColumnRule`] describing how its
//! value is produced for every row.
//!
//! ## Type Hierarchy
//!
//! - `FixtureSchema` - Seed, locale, default file date and tables
//! - `TableTemplate` - Record count, dated variants, columns and overrides
//! - `ColumnDefinition` - Column name plus its rule
//! - `ColumnRule` - Tagged rule variant (`type: ...` in YAML)
//!
//! Cross-table references are not resolved here; ordering and reference
//! checks belong to the pipeline planner in `fixture-generator`.

use crate::values::FixtureValue;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found in table template
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Two tables share a name
    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),

    /// Two columns of one table share a name
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Two variants of one table share a label
    #[error("Duplicate variant '{variant}' in table '{table}'")]
    DuplicateVariant { table: String, variant: String },

    /// A table must produce at least one row
    #[error("Table '{0}' must generate at least one record")]
    ZeroRecords(String),

    /// A table must declare at least one column
    #[error("Table '{0}' has no columns")]
    NoColumns(String),

    /// Rule parameters cannot produce a value
    #[error("Invalid rule for column '{column}' in table '{table}': {reason}")]
    InvalidRule {
        table: String,
        column: String,
        reason: String,
    },

    /// Name used in an output file name is not a plain path component
    #[error("Invalid {kind} '{value}' in table '{table}': {reason}")]
    InvalidFileName {
        table: String,
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    /// YAML value that has no cell representation
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
}

// ============================================================================
// Column Rules
// ============================================================================

/// Upper bound for `words` quantity.
pub const MAX_WORDS: usize = 64;

fn default_digit() -> char {
    '#'
}

fn default_letter() -> char {
    '@'
}

/// Rule describing how a column value is produced.
///
/// Every rule is evaluated once per row and never sees other rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnRule {
    /// Same literal value every row (`null` is the absent sentinel)
    Constant {
        #[serde(default)]
        value: serde_yaml::Value,
    },

    /// Uniform choice from an inline list
    OneOf {
        /// Candidate values
        values: Vec<serde_yaml::Value>,
    },

    /// Uniform choice from the unique values of another table's column
    Reference {
        /// Parent table name
        table: String,
        /// Parent key column
        column: String,
        /// Add the absent sentinel as one extra candidate
        #[serde(default)]
        optional: bool,
    },

    /// Uniform integer in an inclusive range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// String following a mask with digit/letter placeholders
    MaskedCode {
        /// Mask pattern, e.g. `P#########`
        mask: String,
        /// Placeholder replaced with a random digit
        #[serde(default = "default_digit")]
        digit: char,
        /// Placeholder replaced with a random uppercase letter
        #[serde(default = "default_letter")]
        letter: char,
    },

    /// Random second within a calendar-year range, formatted with strftime
    Timestamp {
        /// First year (inclusive, from January 1st)
        start_year: i32,
        /// Last year (inclusive, up to December 31st)
        end_year: i32,
        /// chrono strftime format string
        format: String,
    },

    /// Text drawn from the locale corpus
    Locale(LocaleText),
}

/// Kinds of locale-aware text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocaleText {
    FirstName,
    LastName,
    FullName,
    Title,
    /// `username@domain` with the domain picked from `domains`
    Email {
        domains: Vec<String>,
    },
    Telephone,
    StreetName,
    City,
    State,
    PostalCode,
    /// `quantity` words joined by spaces
    Words {
        quantity: usize,
        #[serde(default)]
        title_case: bool,
    },
    Sentence,
}

/// Locale of the fake-data corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    FrFr,
}

impl ColumnRule {
    /// Parent key referenced by this rule, if any.
    pub fn key_ref(&self) -> Option<KeyRef> {
        match self {
            ColumnRule::Reference { table, column, .. } => Some(KeyRef::new(table, column)),
            _ => None,
        }
    }

    /// Check that the rule parameters can produce a value.
    ///
    /// Returns the reason on failure; the caller attaches table/column.
    fn check(&self) -> Result<(), String> {
        match self {
            ColumnRule::Constant { value } => {
                FixtureValue::try_from(value).map_err(|e| e.to_string())?;
            }
            ColumnRule::OneOf { values } => {
                if values.is_empty() {
                    return Err("one_of requires at least one value".to_string());
                }
                for value in values {
                    FixtureValue::try_from(value).map_err(|e| e.to_string())?;
                }
            }
            ColumnRule::Reference { table, column, .. } => {
                if table.is_empty() || column.is_empty() {
                    return Err("reference requires a table and a column".to_string());
                }
            }
            ColumnRule::IntRange { min, max } => {
                if min > max {
                    return Err(format!("min {min} is greater than max {max}"));
                }
            }
            ColumnRule::MaskedCode {
                mask,
                digit,
                letter,
            } => {
                if mask.is_empty() {
                    return Err("mask must not be empty".to_string());
                }
                if digit == letter {
                    return Err(format!("digit and letter placeholders are both '{digit}'"));
                }
            }
            ColumnRule::Timestamp {
                start_year,
                end_year,
                format,
            } => {
                if start_year > end_year {
                    return Err(format!(
                        "start_year {start_year} is after end_year {end_year}"
                    ));
                }
                if NaiveDate::from_ymd_opt(*start_year, 1, 1).is_none()
                    || NaiveDate::from_ymd_opt(*end_year, 12, 31).is_none()
                {
                    return Err(format!(
                        "years {start_year}..={end_year} are out of the supported range"
                    ));
                }
                if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                    return Err(format!("invalid timestamp format '{format}'"));
                }
            }
            ColumnRule::Locale(LocaleText::Email { domains }) => {
                if domains.is_empty() {
                    return Err("email requires at least one domain".to_string());
                }
            }
            ColumnRule::Locale(LocaleText::Words { quantity, .. }) => {
                if !(1..=MAX_WORDS).contains(quantity) {
                    return Err(format!("words quantity must be within 1..={MAX_WORDS}"));
                }
            }
            ColumnRule::Locale(_) => {}
        }
        Ok(())
    }
}

// ============================================================================
// Table Templates
// ============================================================================

/// Reference to a key column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyRef {
    pub table: String,
    pub column: String,
}

impl KeyRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl std::fmt::Display for KeyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Column with its generator rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name (header in the output file)
    pub name: String,

    /// Rule producing this column's values
    pub generator: ColumnRule,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, generator: ColumnRule) -> Self {
        Self {
            name: name.into(),
            generator,
        }
    }
}

/// Row-level condition on an already generated column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub equals: serde_yaml::Value,
}

/// Assignment applied when a condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideAssignment {
    pub column: String,
    #[serde(default)]
    pub value: serde_yaml::Value,
}

/// Conditional assignment evaluated on each row after generation.
///
/// Used to model optionality tied to another column, e.g. participants of
/// `type_2` having no parent participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Override {
    pub when: Condition,
    pub set: OverrideAssignment,
}

/// Row template for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTemplate {
    /// Table name (also the output file prefix)
    pub name: String,

    /// Rows generated per variant
    pub records: usize,

    /// Date labels; the table is generated once per label
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// Columns in output order
    pub columns: Vec<ColumnDefinition>,

    /// Row-level conditional assignments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,
}

impl TableTemplate {
    /// Create a template without variants or overrides.
    pub fn new(name: impl Into<String>, records: usize, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            records,
            variants: Vec::new(),
            columns,
            overrides: Vec::new(),
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column in declaration order.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Distinct parent keys referenced by this table, in first-use order.
    pub fn references(&self) -> Vec<KeyRef> {
        let mut refs: Vec<KeyRef> = Vec::new();
        for key in self.columns.iter().filter_map(|c| c.generator.key_ref()) {
            if !refs.contains(&key) {
                refs.push(key);
            }
        }
        refs
    }

    /// Distinct parent tables this table depends on, in first-use order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for column in &self.columns {
            if let ColumnRule::Reference { table, .. } = &column.generator {
                if !deps.contains(&table.as_str()) {
                    deps.push(table);
                }
            }
        }
        deps
    }

    /// Validate names, record count, column names, rules and overrides.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_file_component(&self.name, &self.name, "table name")?;
        for variant in &self.variants {
            check_file_component(&self.name, variant, "variant")?;
        }
        if self.records == 0 {
            return Err(SchemaError::ZeroRecords(self.name.clone()));
        }
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
            column
                .generator
                .check()
                .map_err(|reason| SchemaError::InvalidRule {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    reason,
                })?;
        }

        let mut variants = HashSet::new();
        for variant in &self.variants {
            if !variants.insert(variant.as_str()) {
                return Err(SchemaError::DuplicateVariant {
                    table: self.name.clone(),
                    variant: variant.clone(),
                });
            }
        }

        for rule in &self.overrides {
            for column in [&rule.when.column, &rule.set.column] {
                if self.get_column(column).is_none() {
                    return Err(SchemaError::ColumnNotFound {
                        table: self.name.clone(),
                        column: column.clone(),
                    });
                }
            }
            FixtureValue::try_from(&rule.when.equals)?;
            FixtureValue::try_from(&rule.set.value)?;
        }

        Ok(())
    }
}

/// Names and dates end up in `{table}_{date}.csv` and must not leave the
/// output directory.
fn check_file_component(table: &str, value: &str, kind: &'static str) -> Result<(), SchemaError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\']) {
        "must not contain path separators"
    } else if value.contains("..") {
        "must not contain '..'"
    } else {
        return Ok(());
    };
    Err(SchemaError::InvalidFileName {
        table: table.to_string(),
        kind,
        value: value.to_string(),
        reason,
    })
}

// ============================================================================
// Pipeline Schema
// ============================================================================

fn default_version() -> u32 {
    1
}

fn default_file_date() -> String {
    "18010101".to_string()
}

/// Full pipeline definition.
///
/// Loaded from YAML; the source of truth for what gets generated and in
/// which files it ends up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for the single random source of a run
    #[serde(default)]
    pub seed: u64,

    /// Locale of the fake-data corpus
    #[serde(default)]
    pub locale: Locale,

    /// Date suffix for tables without variants
    #[serde(default = "default_file_date")]
    pub file_date: String,

    /// Table templates in declaration order
    pub tables: Vec<TableTemplate>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl FixtureSchema {
    /// Build and validate a schema from table templates.
    pub fn new(seed: u64, tables: Vec<TableTemplate>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            seed,
            locale: Locale::default(),
            file_date: default_file_date(),
            tables,
            table_map: HashMap::new(),
        };
        schema.build_table_map();
        schema.validate()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: FixtureSchema = serde_yaml::from_str(yaml)?;
        schema.build_table_map();
        schema.validate()?;
        Ok(schema)
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the default file date.
    pub fn with_file_date(mut self, file_date: impl Into<String>) -> Self {
        self.file_date = file_date.into();
        self
    }

    /// Override the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Build the internal table lookup map.
    fn build_table_map(&mut self) {
        self.table_map = self
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (table.name.clone(), idx))
            .collect();
    }

    /// Validate the file date, every table, and reject duplicate table names.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_file_component("*", &self.file_date, "file_date")?;
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
            table.validate()?;
        }
        Ok(())
    }

    /// Get a table template by name.
    pub fn get_table(&self, name: &str) -> Option<&TableTemplate> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a table template by name, failing if absent.
    pub fn table(&self, name: &str) -> Result<&TableTemplate, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// All table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
