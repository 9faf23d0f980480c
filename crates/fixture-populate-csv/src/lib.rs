//! CSV file writer for generated fixture tables.
//!
//! Each generated table (or dated variant) becomes one CSV file named
//! `{table}_{date}.csv` in the output directory.
//!
//! # Example
//!
//! ```ignore
//! use fixture_populate_csv::CSVPopulator;
//!
//! let populator = CSVPopulator::new("out");
//! for table in &output.tables {
//!     let metrics = populator.populate(table, &output.file_date)?;
//!     println!("{} rows -> {}", metrics.rows_written, metrics.path.display());
//! }
//! ```

pub mod args;
mod error;
mod populator;

pub use args::{CSVPopulateArgs, CommonPopulateArgs};
pub use error::CSVPopulatorError;
pub use populator::{write_table, CSVPopulator, PopulateMetrics};
