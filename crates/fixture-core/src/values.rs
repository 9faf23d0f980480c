//! Value and table representations produced by the generator.

use crate::schema::SchemaError;
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;
use std::fmt;

/// A single generated cell.
///
/// `Null` is the absent sentinel used for optional references and
/// overrides. It is written as an empty field, never as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixtureValue {
    /// Absent value
    Null,

    /// 64-bit signed integer
    Int(i64),

    /// Text value
    Text(String),
}

impl FixtureValue {
    /// Check if this value is the absent sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FixtureValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for FixtureValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FixtureValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl TryFrom<&YamlValue> for FixtureValue {
    type Error = SchemaError;

    /// Convert a scalar YAML value. Sequences and mappings have no cell form.
    fn try_from(yaml: &YamlValue) -> Result<Self, Self::Error> {
        match yaml {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(b) => Ok(Self::Text(b.to_string())),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => Ok(Self::Text(n.to_string())),
            },
            YamlValue::String(s) => Ok(Self::Text(s.clone())),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(SchemaError::UnsupportedValue(
                format!("{yaml:?} is not a scalar"),
            )),
            YamlValue::Tagged(tagged) => Self::try_from(&tagged.value),
        }
    }
}

/// Materialized rows of one table, or of one dated variant of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTable {
    /// Table name
    pub name: String,

    /// Variant label (file date) when the table is generated per date
    pub variant: Option<String>,

    /// Column names in declaration order
    pub columns: Vec<String>,

    /// Rows, each aligned with `columns`
    pub rows: Vec<Vec<FixtureValue>>,
}

impl GeneratedTable {
    /// Create an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variant: None,
            columns,
            rows: Vec::new(),
        }
    }

    /// Tag the table with a variant label.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Append a row. The row must be aligned with the columns.
    pub fn push_row(&mut self, row: Vec<FixtureValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value at a given row and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&FixtureValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of a column, in row order.
    pub fn column_values(&self, column: &str) -> Option<Vec<&FixtureValue>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Unique values of a column in first-seen order, without the sentinel.
    pub fn unique_values(&self, column: &str) -> Option<Vec<FixtureValue>> {
        Self::unique_values_across(std::slice::from_ref(self), column)
    }

    /// Unique values of a column over several tables concatenated in order.
    ///
    /// Returns `None` if any table lacks the column.
    pub fn unique_values_across(tables: &[GeneratedTable], column: &str) -> Option<Vec<FixtureValue>> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for table in tables {
            for value in table.column_values(column)? {
                if !value.is_null() && seen.insert(value) {
                    unique.push(value.clone());
                }
            }
        }
        Some(unique)
    }

    /// Output file stem: `{name}_{variant}` or `{name}_{default_date}`.
    pub fn file_stem(&self, default_date: &str) -> String {
        let date = self.variant.as_deref().unwrap_or(default_date);
        format!("{}_{}", self.name, date)
    }
}
