//! Integration tests for save/load round-trips.
//!
//! These tests verify that collections written with the atomic writer are
//! read back unchanged by the resilient loader.

use beadview_jsonl::{JsonlWriter, Validate, load_jsonl, write_jsonl_atomic};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestRecord {
    id: u32,
    name: String,
    active: bool,
    #[serde(default)]
    tags: Vec<String>,
}

impl Validate for TestRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn record(id: u32, name: &str) -> TestRecord {
    TestRecord {
        id,
        name: name.to_string(),
        active: id % 2 == 0,
        tags: vec![format!("tag-{id}")],
    }
}

#[rstest]
#[case::simple(record(1, "Alice"))]
#[case::special_chars(record(42, "Line1\nLine2\tTabbed\"Quoted\"\\Backslash"))]
#[case::unicode(record(1, "Hello, \u{4e16}\u{754c}! \u{1F600} \u{00e9}\u{00e8}"))]
#[case::markup(record(7, "Dangerous <script>alert('x')</script> & more"))]
#[case::empty_string(record(1, ""))]
#[case::large_name(record(1, &"x".repeat(100_000)))]
fn single_record_survives_save_and_load(#[case] original: TestRecord) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.jsonl");

    write_jsonl_atomic(&path, std::slice::from_ref(&original)).unwrap();
    let loaded = load_jsonl::<TestRecord>(&path).unwrap();

    assert!(loaded.is_clean());
    assert_eq!(loaded.records, vec![original]);
}

#[test]
fn many_records_round_trip_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.jsonl");
    let originals: Vec<TestRecord> = (0..500).map(|id| record(id, "bulk")).collect();

    write_jsonl_atomic(&path, &originals).unwrap();
    let loaded = load_jsonl::<TestRecord>(&path).unwrap();

    assert_eq!(loaded.records.len(), originals.len());
    assert_eq!(loaded.records, originals);
}

#[test]
fn second_save_replaces_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.jsonl");

    write_jsonl_atomic(&path, &[record(1, "one"), record(2, "two")]).unwrap();
    write_jsonl_atomic(&path, &[record(3, "three")]).unwrap();

    let loaded = load_jsonl::<TestRecord>(&path).unwrap();
    assert_eq!(loaded.records, vec![record(3, "three")]);
}

#[test]
fn writer_output_is_loadable_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.jsonl");

    let mut writer = JsonlWriter::new(Vec::new());
    writer.write_all([record(1, "a"), record(2, "b")]).unwrap();
    std::fs::write(&path, writer.into_inner().unwrap()).unwrap();

    let loaded = load_jsonl::<TestRecord>(&path).unwrap();
    assert_eq!(loaded.records, vec![record(1, "a"), record(2, "b")]);
}
