//! End-to-end tests for the prowl-moves binary

use std::io::Write;

use predicates::prelude::*;

fn write_log(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_counts_well_formed_move_commands() {
    let log = write_log(
        "_Command: MovePredator[id=14x93, predatorId=P001 step=1]\n\
         _Command: MovePredator[id=14x93, predatorId=P001 step=2]\n\
         _Command: MovePredator[id=2x7, predatorId=P002 step=1]\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    cmd.arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Count of 'PredatorID LocationID' occurrences:",
        ))
        .stdout(predicate::str::contains("P001 14x93: 2"))
        .stdout(predicate::str::contains("P002 2x7: 1"));
}

#[test]
fn test_output_sorted_by_key() {
    let log = write_log(
        "_Command: MovePredator[id=1x1, predatorId=Z9 ]\n\
         _Command: MovePredator[id=9x9, predatorId=A1 ]\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    let output = cmd.arg(log.path()).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let a_pos = stdout.find("A1 9x9: 1").unwrap();
    let z_pos = stdout.find("Z9 1x1: 1").unwrap();
    assert!(a_pos < z_pos);
}

#[test]
fn test_malformed_lines_contribute_nothing() {
    let log = write_log(
        "Command: MovePredator[id=1x1, predatorId=P1 ]\n\
         _Command: MovePredator[id=1x1 predatorId=P1 ]\n\
         _Command: MovePredator[id=ax1, predatorId=P1 ]\n\
         some unrelated line\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    cmd.arg(log.path()).assert().success().stdout(
        "No matching '_Command: MovePredator' lines with the specified format were found.\n",
    );
}

#[test]
fn test_missing_file_reports_error_and_exits_zero() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    cmd.arg("/nonexistent/prowl-test.log")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error: File not found at /nonexistent/prowl-test.log",
        ));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_json_format_matches_text_counts() {
    let log = write_log(
        "_Command: MovePredator[id=3x4, predatorId=P7 ]\n\
         _Command: MovePredator[id=3x4, predatorId=P7 ]\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves");
    let output = cmd.arg("--format").arg("json").arg(log.path()).output().unwrap();
    assert!(output.status.success());

    let report: prowl::json_output::JsonMoveReport =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report.counts.len(), 1);
    assert_eq!(report.counts[0].key, "P7 3x4");
    assert_eq!(report.counts[0].count, 2);
}

#[test]
fn test_rerun_is_idempotent() {
    let log = write_log("_Command: MovePredator[id=5x5, predatorId=P3 ]\n");

    let first = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves")
        .arg(log.path())
        .output()
        .unwrap();
    let second = assert_cmd::cargo::cargo_bin_cmd!("prowl-moves")
        .arg(log.path())
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}
