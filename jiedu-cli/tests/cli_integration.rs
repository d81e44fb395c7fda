//! Integration tests for the jiedu CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn segment_reads_from_stdin() {
    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.args(["segment", "-i", "-", "--quiet"])
        .write_stdin("你好嗎？我很好。")
        .assert()
        .success()
        .stdout(predicate::str::contains("你好嗎？"))
        .stdout(predicate::str::contains("我很好。"));
}

#[test]
fn segment_splits_on_newlines_without_terminators() {
    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.args(["segment", "-i", "-", "--quiet"])
        .write_stdin("第一行\n第二行")
        .assert()
        .success()
        .stdout("第一行\n第二行\n");
}

#[test]
fn segment_reads_a_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "氣功是史前文化。這是真的。").unwrap();

    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.args(["segment", "--quiet", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("氣功是史前文化。\n這是真的。\n");
}

#[test]
fn segment_emits_json_records_with_offsets() {
    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    let output = cmd
        .args(["segment", "-i", "-", "-f", "json", "--quiet"])
        .write_stdin("你好嗎？我很好。")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "你好嗎？");
    assert_eq!(records[0]["offset"], 0);
    assert_eq!(records[1]["text"], "我很好。");
    assert_eq!(records[1]["offset"], 4);
    assert_eq!(records[1]["length"], 4);
}

#[test]
fn segment_writes_to_an_output_file() {
    let input = {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "第一句。第二句。").unwrap();
        file
    };
    let output = NamedTempFile::new().unwrap();

    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.args(["segment", "--quiet", "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, "第一句。\n第二句。\n");
}

#[test]
fn segment_requires_an_input() {
    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.arg("segment")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("jiedu").unwrap();
    cmd.arg("frobnicate").assert().failure();
}
