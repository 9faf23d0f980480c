//! Households pipeline end to end.

use super::{args, file_names, generate, path_in, CsvFile};
use tempfile::TempDir;

const ADDRESS: [&str; 8] = [
    "ONS Household ID",
    "Visit ID",
    "Type of Visit",
    "Visit Date/Time",
    "Street",
    "City",
    "County",
    "Postcode",
];

fn with_address(rest: &[&str]) -> Vec<String> {
    ADDRESS
        .iter()
        .chain(rest)
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_households_files() {
    let temp_dir = TempDir::new().unwrap();
    let metrics = generate(&args("households", temp_dir.path()));

    assert_eq!(
        file_names(&metrics),
        vec![
            "lab_bloods_18010101.csv",
            "lab_swabs_18010101.csv",
            "survey_v0_18010101.csv",
            "survey_v1_18010101.csv",
            "survey_v2_18010101.csv",
        ]
    );
    let rows: Vec<u64> = metrics.iter().map(|m| m.rows_written).collect();
    assert_eq!(rows, vec![10, 10, 50, 50, 50]);
}

#[test]
fn test_survey_versions_headers() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("households", temp_dir.path()));
    let dir = temp_dir.path();

    let v0 = CsvFile::read(path_in(dir, "survey_v0_18010101.csv"));
    assert_eq!(
        v0.headers,
        with_address(&["Full_name", "Email", "Swab Barcode 1", "Bloods Barcode 1"])
    );

    let v1 = CsvFile::read(path_in(dir, "survey_v1_18010101.csv"));
    assert_eq!(
        v1.headers,
        with_address(&[
            "Title",
            "First_name",
            "Last_name",
            "Email",
            "Swab_Barcode_1",
            "bloods_barcode_1",
        ])
    );

    let v2 = CsvFile::read(path_in(dir, "survey_v2_18010101.csv"));
    assert_eq!(
        v2.headers,
        with_address(&[
            "Title",
            "First_name",
            "Middle_name",
            "Last_name",
            "Email",
            "Swab_Barcode_1",
            "bloods_barcode_1",
        ])
    );
}

#[test]
fn test_survey_versions_reference_lab_pools() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("households", temp_dir.path()));
    let dir = temp_dir.path();

    let bloods = CsvFile::read(path_in(dir, "lab_bloods_18010101.csv")).column_set("ons_id");
    let swabs = CsvFile::read(path_in(dir, "lab_swabs_18010101.csv")).column_set("Sample");

    let v0 = CsvFile::read(path_in(dir, "survey_v0_18010101.csv"));
    assert!(v0.column("Swab Barcode 1").iter().all(|b| swabs.contains(*b)));
    assert!(v0.column("Bloods Barcode 1").iter().all(|b| bloods.contains(*b)));

    for version in ["survey_v1", "survey_v2"] {
        let survey = CsvFile::read(path_in(dir, &format!("{version}_18010101.csv")));
        assert!(survey.column("Swab_Barcode_1").iter().all(|b| swabs.contains(*b)));
        assert!(survey.column("bloods_barcode_1").iter().all(|b| bloods.contains(*b)));
    }
}

#[test]
fn test_household_codes() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("households", temp_dir.path()));
    let dir = temp_dir.path();

    let bloods = CsvFile::read(path_in(dir, "lab_bloods_18010101.csv"));
    for id in bloods.column("ons_id") {
        assert!(id.starts_with("ONS") && id.len() == 11, "{id}");
    }
    for run_date in bloods.column("run_date_tdi") {
        // dd/mm/YYYY
        assert_eq!(run_date.len(), 10, "{run_date}");
        assert_eq!(&run_date[2..3], "/");
    }

    let v0 = CsvFile::read(path_in(dir, "survey_v0_18010101.csv"));
    for visit in v0.column("Visit ID") {
        assert!(visit.starts_with("DVS-") && visit.len() == 14, "{visit}");
    }
    for household in v0.column("ONS Household ID") {
        assert_eq!(household.len(), 12);
    }
    for kind in v0.column("Type of Visit") {
        assert!(kind == "Follow-up" || kind == "First");
    }
}
