//! Integration tests for the JSON grade store

use malla_tracker::core::models::EvaluationSet;
use malla_tracker::core::store::{GradeStore, JsonFileStore};
use std::fs;
use tempfile::TempDir;

fn setup_store() -> (TempDir, JsonFileStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(temp_dir.path().join("grades.json"));
    (temp_dir, store)
}

fn sample_set() -> EvaluationSet {
    EvaluationSet::new()
        .add_evaluation("Control 1", 40.0, Some(5.5))
        .expect("valid evaluation")
        .add_evaluation("Examen", 60.0, None)
        .expect("valid evaluation")
}

#[test]
fn test_missing_file_loads_empty_set() {
    let (_temp_dir, store) = setup_store();

    let set = store.load("FIS1503").expect("load should succeed");
    assert!(set.is_empty());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_dir, store) = setup_store();
    let set = sample_set();

    store.save("FIS1503", &set).expect("save should succeed");
    let loaded = store.load("FIS1503").expect("load should succeed");

    assert_eq!(loaded, set);
}

#[test]
fn test_sub_scores_survive_persistence() {
    let (_temp_dir, store) = setup_store();

    let set = EvaluationSet::new()
        .add_evaluation("Controles", 50.0, None)
        .expect("valid evaluation");
    let id = set.evaluations()[0].id;
    let set = set.add_sub_score(id, 5.0).add_sub_score(id, 6.0);

    store.save("MAT1610", &set).expect("save should succeed");
    let loaded = store.load("MAT1610").expect("load should succeed");

    assert_eq!(loaded, set);
    assert!((loaded.evaluations()[0].grade().expect("derived grade") - 5.5).abs() < 1e-9);
}

#[test]
fn test_courses_are_independent() {
    let (_temp_dir, store) = setup_store();

    let physics = sample_set();
    let algebra = EvaluationSet::new()
        .add_evaluation("Interrogacion 1", 25.0, Some(6.2))
        .expect("valid evaluation");

    store.save("FIS1503", &physics).expect("save should succeed");
    store.save("MAT1203", &algebra).expect("save should succeed");

    assert_eq!(store.load("FIS1503").expect("load"), physics);
    assert_eq!(store.load("MAT1203").expect("load"), algebra);

    // Overwriting one course leaves the other intact
    let updated = physics.remove_evaluation(physics.evaluations()[0].id);
    store.save("FIS1503", &updated).expect("save should succeed");

    assert_eq!(store.load("FIS1503").expect("load"), updated);
    assert_eq!(store.load("MAT1203").expect("load"), algebra);
}

#[test]
fn test_file_format_is_a_json_map_keyed_by_course() {
    let (temp_dir, store) = setup_store();

    store.save("FIS1503", &sample_set()).expect("save should succeed");

    let content =
        fs::read_to_string(temp_dir.path().join("grades.json")).expect("file should exist");
    let doc: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");

    let entry = doc
        .get("FIS1503")
        .expect("course key present")
        .as_array()
        .expect("evaluations stored as an array");
    assert_eq!(entry.len(), 2);

    let first = &entry[0];
    assert_eq!(first["name"], "Control 1");
    assert_eq!(first["weight"], 40.0);
    assert!(first["subScores"].is_array());
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(temp_dir.path().join("nested").join("dir").join("grades.json"));

    store.save("FIS1503", &sample_set()).expect("save should succeed");
    assert_eq!(store.load("FIS1503").expect("load"), sample_set());
}

#[test]
fn test_overweight_document_is_rejected_on_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("grades.json");
    fs::write(
        &path,
        r#"{"FIS1503": [
            {"id": 1, "name": "Catedra", "weight": 70.0, "grade": 4.0, "subScores": []},
            {"id": 2, "name": "Examen", "weight": 50.0, "grade": null, "subScores": []}
        ]}"#,
    )
    .expect("write should succeed");

    let store = JsonFileStore::new(path);
    let err = store.load("FIS1503").expect_err("overweight course");
    assert!(err.contains("100"));

    // Other courses in the same document are unaffected
    assert!(store.load("MAT1203").expect("load").is_empty());
}

#[test]
fn test_corrupt_file_reports_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("grades.json");
    fs::write(&path, "not json at all").expect("write should succeed");

    let store = JsonFileStore::new(path);
    assert!(store.load("FIS1503").is_err());
}
