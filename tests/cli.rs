#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const UPLOAD: &str = "Client,Account No.,Debtor Name,Contact No.\n\
A,001,Smith,09171234567\n\
B,001,Jones,09179876543\n\
C,002,Cruz,0917\n";

fn viberblast_cmd() -> Command {
    let mut cmd = Command::cargo_bin("viberblast").expect("binary should be built");
    cmd.env_remove("VIBER_BLAST_ADMISSION");
    cmd
}

fn write_upload(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("upload.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn written_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn process_writes_csv_download() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, UPLOAD);
    let out = dir.path().join("out");

    viberblast_cmd()
        .args(["process", "--format", "csv", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("VIBER BLAST "));

    let files = written_files(&out);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("VIBER BLAST "));
    assert!(files[0].ends_with(" PST.csv"));

    let bytes = fs::read(out.join(&files[0])).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(
        text,
        "Campaign,CH Code,First Name,Full Name,Last Name,Mobile Number,OB\n\
A,001,,Smith,,09171234567,\n\
,,,,,,\n"
    );
}

#[test]
fn process_prints_diagnostics_json() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, UPLOAD);

    let assert = viberblast_cmd()
        .args(["process", "--json", "--policy", "permissive", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["policy"], "permissive");
    assert_eq!(json["input_rows"], 3);
    assert_eq!(json["invalid_length_flagged"], 1);
    assert_eq!(json["duplicates_removed"], 1);
    assert_eq!(json["output_rows"], 2);

    assert!(written_files(dir.path()).iter().any(|f| f.ends_with(".xlsx")));
}

#[test]
fn env_selects_policy() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, UPLOAD);

    viberblast_cmd()
        .env("VIBER_BLAST_ADMISSION", "permissive")
        .args(["check", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Policy: permissive"))
        .stdout(predicate::str::contains("Flagged (contact length): 1"));
}

#[test]
fn check_reports_notices() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, UPLOAD);

    viberblast_cmd()
        .args(["check", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output rows: 1"))
        .stdout(predicate::str::contains(
            "Removed 1 rows where Contact No. is not exactly 11 digits.",
        ))
        .stdout(predicate::str::contains(
            "Removed 1 duplicate rows based on 'Account No.'.",
        ));

    assert_eq!(written_files(dir.path()), vec!["upload.csv".to_string()]);
}

#[test]
fn missing_columns_fail() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, "Client,Debtor Name\nA,Smith\n");

    viberblast_cmd()
        .args(["process", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The following required columns are missing: Account No., Contact No.",
        ));
}

#[test]
fn invalid_env_policy_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_upload(&dir, UPLOAD);

    viberblast_cmd()
        .env("VIBER_BLAST_ADMISSION", "loose")
        .args(["check", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("VIBER_BLAST_ADMISSION"));
}

#[test]
fn sample_writes_template_workbook() {
    let dir = TempDir::new().unwrap();

    viberblast_cmd()
        .args(["sample", "-o"])
        .arg(dir.path())
        .assert()
        .success();

    let files = written_files(dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(" PST.xlsx"));
    let bytes = fs::read(dir.path().join(&files[0])).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
