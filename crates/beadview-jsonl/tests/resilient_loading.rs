//! Integration tests for resilient loading.
//!
//! A collection with N valid lines and M bad lines must load exactly N
//! records and report exactly M warnings, with the right line numbers, and
//! never abort because of a single bad line.

use beadview_jsonl::{Loaded, Validate, Warning, load_jsonl, read_jsonl_resilient};
use rstest::rstest;
use serde::Deserialize;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct SimpleRecord {
    id: u32,
    name: String,
}

impl Validate for SimpleRecord {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        Ok(())
    }
}

fn load_str(input: &str) -> Loaded<SimpleRecord> {
    read_jsonl_resilient(Cursor::new(input.to_owned())).unwrap()
}

fn create_temp_jsonl_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn mixed_valid_and_invalid_lines() {
    let input = "\
{\"id\":1,\"name\":\"one\"}
{\"id\":2,\"name\":
{\"id\":3,\"name\":\"   \"}
{\"id\":4,\"name\":\"four\"}
[1,2,3]
{\"id\":6,\"name\":\"six\"}
";
    let loaded = load_str(input);

    let ids: Vec<u32> = loaded.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 4, 6]);

    let lines: Vec<(usize, &str)> = loaded
        .warnings
        .iter()
        .map(|w| (w.line_number(), w.kind()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (2, "malformed_json"),
            (3, "invalid_record"),
            (5, "malformed_json"),
        ]
    );
}

#[rstest]
#[case::all_valid(5, 0)]
#[case::all_invalid(0, 4)]
#[case::mostly_invalid(1, 9)]
#[case::sparse_errors(100, 3)]
fn n_valid_and_m_bad_lines_yield_n_records_and_m_warnings(
    #[case] valid: usize,
    #[case] bad: usize,
) {
    let mut input = String::new();
    for i in 0..valid.max(bad) {
        if i < valid {
            input.push_str(&format!("{{\"id\":{i},\"name\":\"r{i}\"}}\n"));
        }
        if i < bad {
            input.push_str("{broken\n");
        }
    }

    let loaded = load_str(&input);
    assert_eq!(loaded.records.len(), valid);
    assert_eq!(loaded.warnings.len(), bad);
}

#[test]
fn blank_lines_are_not_warnings_but_still_count_for_line_numbers() {
    let input = "\n\n{\"id\":1,\"name\":\"ok\"}\n\nnope\n";
    let loaded = load_str(input);

    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.warnings.len(), 1);
    assert!(matches!(
        loaded.warnings[0],
        Warning::MalformedJson { line_number: 5, .. }
    ));
}

#[test]
fn type_mismatch_is_malformed_json() {
    let loaded = load_str("{\"id\":\"not a number\",\"name\":\"x\"}\n");
    assert!(loaded.records.is_empty());
    assert_eq!(loaded.warnings[0].kind(), "malformed_json");
}

#[test]
fn invalid_utf8_line_is_skipped() {
    let mut bytes = b"{\"id\":1,\"name\":\"ok\"}\n".to_vec();
    bytes.extend_from_slice(b"{\"id\":2,\"name\":\"\xFF\xFE\"}\n");
    bytes.extend_from_slice(b"{\"id\":3,\"name\":\"ok\"}\n");

    let loaded: Loaded<SimpleRecord> = read_jsonl_resilient(Cursor::new(bytes)).unwrap();
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].line_number(), 2);
}

#[test]
fn file_with_bom_and_crlf_loads() {
    let file = create_temp_jsonl_file(
        "\u{feff}{\"id\":1,\"name\":\"first\"}\r\n{\"id\":2,\"name\":\"second\"}\r\n",
    );

    let loaded = load_jsonl::<SimpleRecord>(file.path()).unwrap();
    assert!(loaded.is_clean());
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].name, "first");
}

#[test]
fn missing_file_yields_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_jsonl::<SimpleRecord>(dir.path().join("nope.jsonl")).unwrap();

    assert!(loaded.records.is_empty());
    assert!(loaded.warnings.is_empty());
}

#[test]
fn empty_file_yields_empty_collection() {
    let file = create_temp_jsonl_file("");
    let loaded = load_jsonl::<SimpleRecord>(file.path()).unwrap();

    assert!(loaded.records.is_empty());
    assert!(loaded.is_clean());
}
