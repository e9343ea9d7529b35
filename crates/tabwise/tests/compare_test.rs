//! Integration tests for comparing two loaded files.

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use tabwise::{CellValue, ExportFormat, FieldStatus, Tabwise, TabwiseError, ViewConfig, ViewEngine};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn load_pair(left: &str, right: &str) -> (Arc<tabwise::Dataset>, Arc<tabwise::Dataset>) {
    let tabwise = Tabwise::new();
    let left_file = create_test_file(left);
    let right_file = create_test_file(right);
    (
        tabwise.load(left_file.path()).expect("left loads"),
        tabwise.load(right_file.path()).expect("right loads"),
    )
}

const CENSUS_2023: &str = "\
region,population,mayor,area
north,1200,Ortiz,33.5
south,800,Ng,12
east,450,Brook,9
";

const CENSUS_2024: &str = "\
Region,Population,Mayor,Budget
north,1250,Ortiz,10
south,800,Patel,7
west,300,Kim,2
";

#[test]
fn test_census_buckets() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(left, right);

    assert_eq!(engine.candidate_keys(), vec!["region", "population", "mayor"]);
    assert_eq!(engine.key(), Some("region"));

    let comparison = engine.comparison().unwrap();
    let summary = comparison.summary();
    assert_eq!(summary.matches, 2);
    assert_eq!(summary.left_only, 1);
    assert_eq!(summary.right_only, 1);
    assert_eq!(summary.shadowed_right, 0);

    assert_eq!(comparison.unique_left()[0].get("region"), &CellValue::from("east"));
    assert_eq!(comparison.unique_right()[0].get("region"), &CellValue::from("west"));

    assert_eq!(
        comparison.merged_columns(),
        &[
            "region",
            "(File 1) population",
            "(File 2) population",
            "(File 1) mayor",
            "(File 2) mayor",
            "(File 1) area",
            "(File 2) budget",
        ]
    );
}

#[test]
fn test_census_diff() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(left, right);
    let comparison = engine.comparison().unwrap();

    // north: population changed by +50, area and budget each one-sided
    let north = comparison.diff_match(0).unwrap();
    let statuses: Vec<(&str, FieldStatus)> =
        north.iter().map(|d| (d.column.as_str(), d.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("population", FieldStatus::Mismatch),
            ("area", FieldStatus::Mismatch),
            ("budget", FieldStatus::Mismatch),
            ("region", FieldStatus::Match),
            ("mayor", FieldStatus::Match),
        ]
    );
    assert_eq!(north[0].delta, Some(50.0));
    assert_eq!(north[1].delta, None);

    // south: mayor is a text change
    let south = comparison.diff_match(1).unwrap();
    let mayor = south.iter().find(|d| d.column == "mayor").unwrap();
    assert_eq!(mayor.status, FieldStatus::Mismatch);
    assert_eq!(mayor.delta, None);
}

#[test]
fn test_choose_other_key() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(left, right);
    engine.set_key("population").unwrap();

    let comparison = engine.comparison().unwrap();
    assert_eq!(comparison.key(), "population");
    assert_eq!(comparison.summary().matches, 1);
    assert_eq!(
        comparison.matches()[0].get("(File 2) region"),
        &CellValue::from("south")
    );
}

#[test]
fn test_disjoint_files_are_incomparable() {
    let (left, right) = load_pair("a,b\n1,2\n", "c,d\n3,4\n");
    let mut engine = Tabwise::new().compare(left, right);
    assert!(engine.key().is_none());
    assert!(matches!(
        engine.comparison(),
        Err(TabwiseError::Incomparable { .. })
    ));
}

#[test]
fn test_empty_buckets_are_not_errors() {
    let (left, right) = load_pair("id,v\n1,a\n", "id,v\n2,b\n");
    let mut engine = Tabwise::new().compare(left, right);
    let comparison = engine.comparison().unwrap();
    assert!(comparison.matches().is_empty());
    assert_eq!(comparison.unique_left().len(), 1);
    assert_eq!(comparison.unique_right().len(), 1);
}

#[test]
fn test_matches_bucket_in_a_view() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(left, right);
    let matches = Arc::new(engine.comparison().unwrap().matches_dataset());

    let mut view = ViewEngine::with_config(matches, ViewConfig::default().full());
    view.set_search("patel");
    assert_eq!(view.visible_count(), 1);

    view.select_column(1);
    let stats = view.stats().unwrap();
    assert_eq!(stats.numeric.unwrap().sum, 800.0);
}

#[test]
fn test_edit_on_one_side_recomputes() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(Arc::clone(&left), right);
    assert_eq!(engine.comparison().unwrap().summary().matches, 2);

    let mut view = ViewEngine::new(left);
    assert!(view.begin_edit(2, "region"));
    view.stage_edit("west");
    assert!(view.commit_edit());

    engine.set_left(Arc::clone(view.dataset()));
    let summary = engine.comparison().unwrap().summary();
    assert_eq!(summary.matches, 3);
    assert_eq!(summary.left_only, 0);
    assert_eq!(summary.right_only, 0);
}

#[test]
fn test_export_matches_json_in_merged_order() {
    let (left, right) = load_pair(CENSUS_2023, CENSUS_2024);
    let mut engine = Tabwise::new().compare(left, right);
    let table = engine.comparison().unwrap().matches_table();

    let out = NamedTempFile::new().unwrap();
    table.save(out.path(), ExportFormat::Json).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["(File 2) mayor"], "Patel");
    assert_eq!(value[0]["(File 2) budget"], serde_json::json!(10.0));
    assert!(value[0].get("(File 2) area").is_none());
}
