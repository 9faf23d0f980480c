//! Built-in pipeline integration tests.
//!
//! Each test runs a built-in pipeline end to end into a temp directory and
//! checks the written CSV files:
//! 1. File names, headers and row counts
//! 2. Referential soundness of every key-pool join
//! 3. Byte-identical output for the same seed

mod determinism;
mod households;
mod schools;

use fixture_populate_csv::{CSVPopulateArgs, CommonPopulateArgs, PopulateMetrics};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use survey_fixtures::{run_generate, GenerateOutcome};

/// Common arguments for a built-in pipeline run with defaults.
pub fn args(pipeline: &str, output_dir: &Path) -> CSVPopulateArgs {
    CSVPopulateArgs {
        output_dir: output_dir.to_path_buf(),
        no_header: false,
        common: CommonPopulateArgs {
            pipeline: Some(pipeline.to_string()),
            schema: None,
            seed: None,
            file_date: None,
            tables: Vec::new(),
            dry_run: false,
        },
    }
}

/// Run the generate command and return the written files.
pub fn generate(args: &CSVPopulateArgs) -> Vec<PopulateMetrics> {
    match run_generate(args).expect("generate failed") {
        GenerateOutcome::Written(metrics) => metrics,
        GenerateOutcome::Planned(_) => panic!("Expected files, got a plan"),
    }
}

/// A parsed CSV file.
pub struct CsvFile {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvFile {
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
        let headers = reader
            .headers()
            .expect("Failed to read headers")
            .iter()
            .map(String::from)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.expect("Bad record").iter().map(String::from).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Vec<&str> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .unwrap_or_else(|| panic!("No column '{name}' in {:?}", self.headers));
        self.rows.iter().map(|row| row[idx].as_str()).collect()
    }

    pub fn column_set(&self, name: &str) -> HashSet<String> {
        self.column(name).into_iter().map(String::from).collect()
    }
}

pub fn file_names(metrics: &[PopulateMetrics]) -> Vec<String> {
    metrics
        .iter()
        .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

pub fn path_in(dir: &Path, file: &str) -> PathBuf {
    dir.join(file)
}
