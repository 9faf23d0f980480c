//! Schools pipeline end to end.

use super::{args, file_names, generate, path_in, CsvFile};
use std::collections::HashSet;
use tempfile::TempDir;

#[test]
fn test_schools_files_and_row_counts() {
    let temp_dir = TempDir::new().unwrap();
    let metrics = generate(&args("schools", temp_dir.path()));

    assert_eq!(
        file_names(&metrics),
        vec![
            "survey_schools_18010101.csv",
            "survey_participants_18010101.csv",
            "survey_responses_18010101.csv",
            "labs_swabs_18010101.csv",
            "labs_swabs_18010102.csv",
            "labs_swabs_18010103.csv",
            "labs_bloods_18010101.csv",
            "labs_saliva_18010101.csv",
            "survey_visits_18010101.csv",
        ]
    );

    let rows: Vec<u64> = metrics.iter().map(|m| m.rows_written).collect();
    assert_eq!(rows, vec![10, 40, 100, 10, 10, 10, 10, 10, 100]);
}

#[test]
fn test_schools_column_shapes() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("schools", temp_dir.path()));
    let dir = temp_dir.path();

    let schools = CsvFile::read(path_in(dir, "survey_schools_18010101.csv"));
    assert_eq!(schools.headers.len(), 13);
    for urn in schools.column("schl_urn") {
        assert_eq!(urn.len(), 6);
        assert!(urn.chars().all(|c| c.is_ascii_digit()), "{urn}");
    }
    for email in schools.column("school_contact_email") {
        assert!(email.ends_with("@gsnail.ac.uk"), "{email}");
    }

    let swabs = CsvFile::read(path_in(dir, "labs_swabs_18010102.csv"));
    assert_eq!(
        swabs.headers,
        vec!["Sample", "Result", "Date Tested", "Seq-Target", "Seq-Result"]
    );
    assert!(swabs.column("Seq-Target").iter().all(|v| *v == "A gene"));
    for sample in swabs.column("Sample") {
        assert!(sample.starts_with("SIS"));
        assert_eq!(sample.len(), 11);
    }
    for tested in swabs.column("Date Tested") {
        assert!(tested.ends_with(" UTC"), "{tested}");
        let year: i32 = tested[..4].parse().unwrap();
        assert!((1800..=1802).contains(&year));
    }
}

#[test]
fn test_type_2_participants_have_no_parent() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("schools", temp_dir.path()));

    let participants =
        CsvFile::read(path_in(temp_dir.path(), "survey_participants_18010101.csv"));
    let types = participants.column("participant_type");
    let parents = participants.column("parent_participant_id");

    for (kind, parent) in types.iter().zip(&parents) {
        match *kind {
            "type_2" => assert_eq!(*parent, ""),
            "type_1" => assert!(parent.starts_with('P') && parent.len() == 10),
            other => panic!("Unexpected participant_type {other}"),
        }
    }
}

#[test]
fn test_schools_references_are_sound() {
    let temp_dir = TempDir::new().unwrap();
    generate(&args("schools", temp_dir.path()));
    let dir = temp_dir.path();

    let schools = CsvFile::read(path_in(dir, "survey_schools_18010101.csv"));
    let participants = CsvFile::read(path_in(dir, "survey_participants_18010101.csv"));
    let responses = CsvFile::read(path_in(dir, "survey_responses_18010101.csv"));
    let visits = CsvFile::read(path_in(dir, "survey_visits_18010101.csv"));
    let bloods = CsvFile::read(path_in(dir, "labs_bloods_18010101.csv"));
    let saliva = CsvFile::read(path_in(dir, "labs_saliva_18010101.csv"));

    let urns = schools.column_set("schl_urn");
    assert!(participants
        .column("schl_urn")
        .iter()
        .all(|urn| urns.contains(*urn)));

    let participant_ids = participants.column_set("participant_id");
    assert!(responses
        .column("participant_id")
        .iter()
        .all(|id| participant_ids.contains(*id)));
    assert!(visits
        .column("participant_id")
        .iter()
        .all(|id| participant_ids.contains(*id)));

    // Visits may reference a swab from any of the three dated files
    let mut swab_pool: HashSet<String> = HashSet::new();
    for date in ["18010101", "18010102", "18010103"] {
        let swabs = CsvFile::read(path_in(dir, &format!("labs_swabs_{date}.csv")));
        swab_pool.extend(swabs.column_set("Sample"));
    }
    assert!(swab_pool.len() <= 30);
    assert!(visits
        .column("swab_Sample_barcode")
        .iter()
        .all(|b| swab_pool.contains(*b)));

    let blood_pool = bloods.column_set("blood_barcode");
    let saliva_pool = saliva.column_set("saliva_barcode");
    for barcode in visits.column("blood_thriva_barcode") {
        assert!(barcode.is_empty() || blood_pool.contains(barcode));
    }
    for barcode in visits.column("oral_swab_barcode") {
        assert!(barcode.is_empty() || saliva_pool.contains(barcode));
    }
}

#[test]
fn test_selected_tables_only() {
    let temp_dir = TempDir::new().unwrap();
    let mut run = args("schools", temp_dir.path());
    run.common.tables = vec!["survey_visits".to_string()];

    let metrics = generate(&run);
    assert_eq!(file_names(&metrics), vec!["survey_visits_18010101.csv"]);

    let written: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn test_file_date_override() {
    let temp_dir = TempDir::new().unwrap();
    let mut run = args("schools", temp_dir.path());
    run.common.file_date = Some("20240115".to_string());

    let names = file_names(&generate(&run));
    assert!(names.contains(&"survey_schools_20240115.csv".to_string()));
    // Variant labels are not affected by the default date
    assert!(names.contains(&"labs_swabs_18010102.csv".to_string()));
}
