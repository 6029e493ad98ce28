//! Integration tests for dbprint CLI

use std::path::Path;
use std::process::Command;

use rusqlite::Connection;
use tempfile::tempdir;

fn run_dbprint(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "dbprint", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Create animal.db with a 15 row dog table and an empty colorLookup table.
fn animal_db(dir: &Path) -> String {
    let path = dir.join("animal.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE dog (ID INTEGER, NAME VARCHAR(20), WEIGHT REAL, GOOD BOOLEAN);
         CREATE TABLE colorLookup (ID INTEGER, COLOR TEXT);",
    )
    .unwrap();
    for i in 1..=15 {
        conn.execute(
            "INSERT INTO dog VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![i, format!("dog{i}"), i as f64 / 2.0, i % 2],
        )
        .unwrap();
    }
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_dbprint(&["--help"]);

    assert!(success);
    assert!(stdout.contains("dbprint"));
    assert!(stdout.contains("--max-rows"));
    assert!(stdout.contains("--max-width"));
    assert!(stdout.contains("--sink"));
    assert!(stdout.contains("--query"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_dbprint(&["--version"]);

    assert!(success);
    assert!(stdout.contains("dbprint"));
}

// ============================================================================
// Text output
// ============================================================================

#[test]
fn test_table_output() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, _, success) = run_dbprint(&[&db, "dog"]);

    assert!(success);
    assert!(stdout.contains("Printing 10 rows from table dog"));
    assert!(stdout.contains("| ID |  NAME  | WEIGHT | GOOD |"));
    assert!(stdout.contains("|  1 | dog1   |  0.500 |    1 |"));
    assert!(!stdout.contains("dog11"));
}

#[test]
fn test_max_rows() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, _, success) = run_dbprint(&[&db, "dog", "--max-rows", "2"]);

    assert!(success);
    assert!(stdout.contains("Printing 2 rows from table dog"));
    assert!(!stdout.contains("dog3"));
}

#[test]
fn test_negative_max_rows_uses_default() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, stderr, success) = run_dbprint(&[&db, "dog", "--max-rows", "-1"]);

    assert!(success);
    assert!(stdout.contains("Printing 10 rows from table dog"));
    assert!(stderr.contains("WARN"));
}

#[test]
fn test_multiple_tables() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, _, success) = run_dbprint(&[&db, "dog", "colorLookup", "-n", "1"]);

    assert!(success);
    assert!(stdout.contains("Printing 1 row from table dog"));
    assert!(stdout.contains("Printing 0 rows from table colorLookup"));
    assert!(stdout.contains("| ID | COLOR |"));
}

#[test]
fn test_query_output() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, _, success) = run_dbprint(&[
        &db,
        "--query",
        "SELECT NAME FROM dog WHERE ID = 3",
    ]);

    assert!(success);
    assert!(stdout.contains("Printing 1 row from table (query)"));
    assert!(stdout.contains("| dog3 |"));
}

#[test]
fn test_missing_table_fails_but_prints_others() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, stderr, success) = run_dbprint(&[&db, "cat", "dog"]);

    assert!(!success);
    assert!(stdout.contains("Printing 10 rows from table dog"));
    assert!(stderr.contains("Failed to print table"));
}

// ============================================================================
// Resource checks
// ============================================================================

#[test]
fn test_unknown_driver() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, stderr, success) = run_dbprint(&[&db, "dog", "--driver", "oracle"]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("oracle"));
}

#[test]
fn test_missing_database() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.db");

    let (stdout, stderr, success) = run_dbprint(&[missing.to_str().unwrap(), "dog"]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(!missing.exists());
}

#[test]
fn test_nothing_to_print() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (_, stderr, success) = run_dbprint(&[&db]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

// ============================================================================
// Sinks and formats
// ============================================================================

#[test]
fn test_file_sink_appends() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());
    let out = dir.path().join("output.log");
    let out_path = out.to_str().unwrap();

    let args = [db.as_str(), "dog", "-n", "1", "--sink", "file", "--output-file", out_path];
    let (stdout, _, success) = run_dbprint(&args);
    assert!(success);
    assert!(!stdout.contains("Printing"));

    let (_, _, success) = run_dbprint(&args);
    assert!(success);

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.matches("Printing 1 row from table dog").count(), 2);
}

#[test]
fn test_file_sink_requires_path() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (_, stderr, success) = run_dbprint(&[&db, "dog", "--sink", "file"]);

    assert!(!success);
    assert!(stderr.contains("--output-file"));
}

#[test]
fn test_log_sink() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, stderr, success) = run_dbprint(&[&db, "dog", "-n", "1", "--sink", "log"]);

    assert!(success);
    assert!(!stdout.contains("Printing"));
    assert!(stderr.contains("Printing 1 row from table dog"));
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    let db = animal_db(dir.path());

    let (stdout, _, success) = run_dbprint(&[&db, "dog", "-n", "2", "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed[0]["row_count"], 2);
    assert_eq!(parsed[0]["tables"][0], "dog");
    assert_eq!(parsed[0]["columns"][1]["label"], "NAME");
    assert_eq!(parsed[0]["columns"][1]["values"][1], "dog2");
    assert_eq!(parsed[0]["columns"][2]["values"][0], "0.500");
}
