//! survey-fixtures library
//!
//! Generates deterministic synthetic input files for health-survey data
//! pipelines: school and household survey responses, participant registers
//! and laboratory results. Every value is fake, and the same seed always
//! produces byte-identical files.
//!
//! # CLI Usage
//!
//! ```bash
//! # Run the built-in schools pipeline into ./out
//! survey-fixtures generate --pipeline schools --output-dir out
//!
//! # Run a custom schema with another seed, writing only two tables
//! survey-fixtures generate --schema my_pipeline.yaml --seed 7 --tables survey_v0,survey_v1
//!
//! # Print the generation plan without writing anything
//! survey-fixtures generate --pipeline households --dry-run
//! ```

pub mod builtin;
pub mod generate;

pub use builtin::{BuiltinPipeline, BUILTIN_PIPELINES};
pub use generate::{load_schema, run_generate, GenerateOutcome};
