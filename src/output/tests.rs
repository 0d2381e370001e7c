//! Tests for output emission

use super::*;
use crate::mapping::NormalizedObject;
use crate::types::ResourceKind;
use serde_json::json;
use std::collections::BTreeMap;

fn sample_objects() -> BTreeMap<ResourceKind, Vec<NormalizedObject>> {
    let mut map = BTreeMap::new();
    map.insert(
        ResourceKind::Project,
        vec![NormalizedObject::new("1", "P1", "cargProject")
            .with_property("status", json!("Active"))],
    );
    map.insert(
        ResourceKind::Service,
        vec![
            NormalizedObject::new("101", "S1", "cargService").with_relation("project", "1"),
            NormalizedObject::new("102", "S2", "cargService").with_relation("project", "1"),
        ],
    );
    map
}

#[test]
fn test_write_objects_creates_per_kind_and_combined_files() {
    let dir = tempfile::tempdir().unwrap();
    let written = write_objects(dir.path(), &sample_objects()).unwrap();

    assert_eq!(written.len(), 3);
    assert!(dir.path().join("carg_projects.json").exists());
    assert!(dir.path().join("carg_services.json").exists());
    assert!(dir.path().join("all_objects.json").exists());
}

#[test]
fn test_written_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_objects(dir.path(), &sample_objects()).unwrap();

    let text = std::fs::read_to_string(dir.path().join("carg_services.json")).unwrap();
    let parsed: Vec<NormalizedObject> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].identifier, "101");
    assert_eq!(parsed[0].relations["project"], "1");

    let text = std::fs::read_to_string(dir.path().join("all_objects.json")).unwrap();
    let combined: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(combined["projects"].as_array().unwrap().len(), 1);
    assert_eq!(combined["services"].as_array().unwrap().len(), 2);
}

#[test]
fn test_write_objects_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a/b/c");
    write_objects(&nested, &sample_objects()).unwrap();
    assert!(nested.join("all_objects.json").exists());
}

#[test]
fn test_empty_result_still_writes_combined_file() {
    let dir = tempfile::tempdir().unwrap();
    let written = write_objects(dir.path(), &BTreeMap::new()).unwrap();
    assert_eq!(written.len(), 1);
    assert!(dir.path().join("all_objects.json").exists());
}
