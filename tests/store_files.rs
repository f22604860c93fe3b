// tests/store_files.rs
use std::fs;

use pretty_assertions::assert_eq;

use findjobs::config::options::ExportFormat;
use findjobs::error::Error;
use findjobs::pipeline::reconcile;
use findjobs::posting;
use findjobs::store::{append_new, read_results, write_results};

fn sample() -> Vec<findjobs::data::JobPosting> {
    vec![
        posting!("Sales, Marketing Lead", "Acme", "Austin, TX"),
        posting!("Cook", "Diner"),
        posting!("The \"Best\" Job", "Initech", "Remote"),
    ]
}

#[test]
fn lines_file_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/jobs.txt");

    write_results(&path, ExportFormat::Lines, &sample()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Cook, Diner, \n"));

    assert!(text.contains("\"Austin, TX\"\n"));

    assert_eq!(read_results(&path, ExportFormat::Lines).unwrap(), sample());
}

#[test]
fn lines_file_with_city_state_location_reconciles_and_dedups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.txt");
    let austin = posting!("Backend Engineer", "Acme Corp", "Austin, TX");

    write_results(&path, ExportFormat::Lines, &[austin.clone()]).unwrap();
    let back = read_results(&path, ExportFormat::Lines).unwrap();
    assert_eq!(back, vec![austin.clone()]);

    assert_eq!(reconcile(vec![austin.clone()], &back).len(), 0);
    assert_eq!(append_new(&path, ExportFormat::Lines, &[austin.clone()]).unwrap(), 0);
    assert_eq!(read_results(&path, ExportFormat::Lines).unwrap(), vec![austin]);
}

#[test]
fn table_file_reads_back_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.tsv");

    write_results(&path, ExportFormat::Table, &sample()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Title Company Location\n"));

    assert_eq!(read_results(&path, ExportFormat::Table).unwrap(), sample());
}

#[test]
fn append_adds_only_new_postings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.tsv");
    let first = vec![posting!("A", "1"), posting!("B", "2")];
    write_results(&path, ExportFormat::Table, &first).unwrap();

    let added = append_new(&path, ExportFormat::Table, &[posting!("B", "2"), posting!("C", "3"), posting!("C", "3")]).unwrap();
    assert_eq!(added, 1);
    assert_eq!(
        read_results(&path, ExportFormat::Table).unwrap(),
        vec![posting!("A", "1"), posting!("B", "2"), posting!("C", "3")]
    );

    assert_eq!(append_new(&path, ExportFormat::Table, &first).unwrap(), 0);
}

#[test]
fn append_creates_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");
    assert_eq!(append_new(&path, ExportFormat::Lines, &[posting!("A", "1")]).unwrap(), 1);
    assert_eq!(read_results(&path, ExportFormat::Lines).unwrap(), vec![posting!("A", "1")]);
}

#[test]
fn append_after_hand_edit_without_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.txt");
    fs::write(&path, "# kept by hand\nA, 1, NY").unwrap();

    append_new(&path, ExportFormat::Lines, &[posting!("B", "2")]).unwrap();
    assert_eq!(
        read_results(&path, ExportFormat::Lines).unwrap(),
        vec![posting!("A", "1", "NY"), posting!("B", "2")]
    );
}

#[test]
fn missing_import_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_results(&dir.path().join("nope.txt"), ExportFormat::Lines).unwrap_err();
    assert!(matches!(err, Error::ImportNotFound(_)));
    assert_eq!(err.exit_code(), 1);
}
