//! Fixture table generator for survey-fixtures.
//!
//! This crate provides the [`TableGenerator`], which expands a row template
//! into a table of deterministic rows, and the [`Pipeline`], which runs the
//! generators of a schema in dependency order and threads key pools from
//! parent tables into their dependents.
//!
//! # Architecture
//!
//! ```text
//! FixtureSchema (YAML)
//!        │
//!        ▼
//! ┌──────────────────┐      plan: topological order over `reference` rules
//! │     Pipeline     │
//! └────────┬─────────┘
//!          │  template + KeyPools
//!          ▼
//! ┌──────────────────┐
//! │  TableGenerator  │      one StdRng per run, passed in explicitly
//! │  - rng           │
//! │  - locale        │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    GeneratedTable { name, variant, columns, rows }
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::FixtureSchema;
//! use fixture_generator::Pipeline;
//!
//! let schema = FixtureSchema::from_yaml(r#"
//! seed: 42
//! tables:
//!   - name: survey_schools
//!     records: 10
//!     columns:
//!       - name: schl_urn
//!         generator: { type: masked_code, mask: '######' }
//!   - name: survey_participants
//!     records: 40
//!     columns:
//!       - name: schl_urn
//!         generator: { type: reference, table: survey_schools, column: schl_urn }
//! "#).unwrap();
//!
//! let output = Pipeline::new(schema).unwrap().run().unwrap();
//! assert_eq!(output.tables.len(), 2);
//! ```
//!
//! # Rules
//!
//! - `constant` - Same value every row
//! - `one_of` - Uniform choice from an inline list
//! - `reference` - Uniform choice from a parent table's unique keys
//! - `int_range` - Uniform integer in an inclusive range
//! - `masked_code` - Mask with digit/letter placeholders
//! - `timestamp` - Random second in a year range, strftime formatted
//! - `locale` - Names, emails, addresses and lorem text from `fake`

pub mod generator;
pub mod generators;
pub mod pipeline;

// Re-exports for convenience
pub use generator::{GeneratorError, KeyPools, TableGenerator};
pub use pipeline::{GenerationPlan, Pipeline, PipelineOutput, PlanStep};
