//! Core types for the survey-fixtures generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the writers:
//!
//! - [`FixtureSchema`] - Pipeline definition loaded from YAML
//! - [`TableTemplate`] - Ordered row template for a single table
//! - [`ColumnRule`] - How one column's value is produced
//! - [`FixtureValue`] - A single generated cell
//! - [`GeneratedTable`] - Materialized rows of one table (or one dated variant)
//!
//! # Architecture
//!
//! ```text
//! fixture-core (this crate)
//!    │
//!    ├─── fixture-generator     (evaluates templates, orders tables)
//!    │
//!    └─── fixture-populate-csv  (writes GeneratedTable to CSV)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::FixtureSchema;
//!
//! let schema = FixtureSchema::from_yaml(r#"
//! seed: 42
//! file_date: "18010101"
//! tables:
//!   - name: survey_schools
//!     records: 10
//!     columns:
//!       - name: schl_urn
//!         generator:
//!           type: masked_code
//!           mask: '######'
//! "#).unwrap();
//!
//! assert_eq!(schema.table_names(), vec!["survey_schools"]);
//! ```

pub mod schema;
pub mod values;

// Re-exports for convenience
pub use schema::{
    ColumnDefinition, ColumnRule, Condition, FixtureSchema, KeyRef, Locale, LocaleText, Override,
    OverrideAssignment, SchemaError, TableTemplate,
};
pub use values::{FixtureValue, GeneratedTable};
