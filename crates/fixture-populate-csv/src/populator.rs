//! CSV populator for generated tables.

use crate::error::CSVPopulatorError;
use csv::Writer;
use fixture_core::{FixtureValue, GeneratedTable};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from writing one file.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// File written.
    pub path: PathBuf,
    /// Number of data rows written.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes generated tables as CSV files into one output directory.
pub struct CSVPopulator {
    output_dir: PathBuf,
    include_header: bool,
}

impl CSVPopulator {
    /// Create a populator writing into `output_dir`.
    ///
    /// The directory is created on the first write if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            include_header: true,
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the file a table is written to.
    pub fn output_path(&self, table: &GeneratedTable, default_date: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.csv", table.file_stem(default_date)))
    }

    /// Write one table to `{output_dir}/{table}_{date}.csv`.
    ///
    /// `default_date` is used when the table has no variant label.
    pub fn populate(
        &self,
        table: &GeneratedTable,
        default_date: &str,
    ) -> Result<PopulateMetrics, CSVPopulatorError> {
        let start_time = Instant::now();
        std::fs::create_dir_all(&self.output_dir)?;

        let output_path = self.output_path(table, default_date);
        debug!(
            "Writing {} rows of '{}' to '{}'",
            table.len(),
            table.name,
            output_path.display()
        );

        let file = File::create(&output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        write_table(buf_writer, table, self.include_header)?;

        let metrics = PopulateMetrics {
            file_size_bytes: std::fs::metadata(&output_path)?.len(),
            path: output_path,
            rows_written: table.len() as u64,
            total_duration: start_time.elapsed(),
        };

        info!(
            "Wrote {}: {} rows, {} bytes in {:?}",
            metrics.path.display(),
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration
        );

        Ok(metrics)
    }

    /// Write every table in order.
    pub fn populate_all(
        &self,
        tables: &[GeneratedTable],
        default_date: &str,
    ) -> Result<Vec<PopulateMetrics>, CSVPopulatorError> {
        tables
            .iter()
            .map(|table| self.populate(table, default_date))
            .collect()
    }
}

/// Serialize a table as CSV into any writer, flushing at the end.
pub fn write_table<W: Write>(
    out: W,
    table: &GeneratedTable,
    include_header: bool,
) -> Result<(), CSVPopulatorError> {
    let mut writer = Writer::from_writer(out);

    if include_header {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row_to_csv_record(row))?;
    }

    writer.flush()?;
    Ok(())
}

/// Convert a row to CSV fields; the absent sentinel becomes an empty field.
fn row_to_csv_record(row: &[FixtureValue]) -> Vec<String> {
    row.iter().map(FixtureValue::to_string).collect()
}
