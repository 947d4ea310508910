// CLI integration tests for coljoin/colsplit flows.
use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn coljoin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_coljoin"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn colsplit() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_colsplit"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

fn parse_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next().expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn join_then_split_round_trip() {
    let temp = tempfile::tempdir().expect("tempdir");
    let ids = temp.path().join("ids.txt");
    let notes = temp.path().join("notes.txt");
    fs::write(&ids, "1\n2\n3\n").unwrap();
    fs::write(&notes, "plain\nhas::sep\nsays \"hi\"\n").unwrap();

    let join = coljoin()
        .args(["::", path_arg(&ids), path_arg(&notes)])
        .output()
        .expect("coljoin");
    assert!(join.status.success());
    assert_eq!(
        join.stdout,
        b"1::plain\n2::\"has::sep\"\n3::\"says \"\"hi\"\"\"\n"
    );

    let table = temp.path().join("table.txt");
    fs::write(&table, &join.stdout).unwrap();
    let template = temp.path().join("col%d.txt");

    let split = colsplit()
        .args(["::", path_arg(&table), path_arg(&template)])
        .output()
        .expect("colsplit");
    assert!(split.status.success());
    assert!(split.stderr.is_empty());
    assert_eq!(fs::read(temp.path().join("col0.txt")).unwrap(), fs::read(&ids).unwrap());
    assert_eq!(fs::read(temp.path().join("col1.txt")).unwrap(), fs::read(&notes).unwrap());
    assert!(!temp.path().join("col2.txt").exists());
}

#[test]
fn join_pads_missing_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    let a = temp.path().join("a.txt");
    let b = temp.path().join("b.txt");
    fs::write(&a, "1\n2\n").unwrap();
    fs::write(&b, "a\nb\nc\n").unwrap();

    let join = coljoin()
        .args([",", path_arg(&a), path_arg(&b)])
        .output()
        .expect("coljoin");
    assert!(join.status.success());
    assert_eq!(join.stdout, b"1,a\n2,b\n,c\n");
}

#[test]
fn split_writes_short_rows_as_empty_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    let table = temp.path().join("table.csv");
    fs::write(&table, "1,a\n2,b\n,c\n").unwrap();
    let template = temp.path().join("out_%02d.txt");

    let split = colsplit()
        .args([",", path_arg(&table), path_arg(&template)])
        .output()
        .expect("colsplit");
    assert!(split.status.success());
    assert_eq!(fs::read(temp.path().join("out_00.txt")).unwrap(), b"1\n2\n\n");
    assert_eq!(fs::read(temp.path().join("out_01.txt")).unwrap(), b"a\nb\nc\n");
}

#[test]
fn split_reports_malformed_quoting_and_continues() {
    let temp = tempfile::tempdir().expect("tempdir");
    let table = temp.path().join("table.csv");
    fs::write(&table, "ok,fine\n\"bad\"x,y\n").unwrap();
    let template = temp.path().join("c%d");

    let split = colsplit()
        .args([",", path_arg(&table), path_arg(&template)])
        .output()
        .expect("colsplit");
    assert!(split.status.success());
    let notice = parse_json_line(&split.stderr);
    let inner = &notice["notice"];
    assert_eq!(inner["kind"], "trailing_bytes");
    assert_eq!(inner["cmd"], "colsplit");
    assert_eq!(inner["line"], 2);
    assert_eq!(inner["column"], 1);
    assert_eq!(fs::read(temp.path().join("c0")).unwrap(), b"ok\nbadx\n");
    assert_eq!(fs::read(temp.path().join("c1")).unwrap(), b"fine\ny\n");
}

#[test]
fn missing_input_exits_with_one() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing.txt");

    let join = coljoin()
        .args([",", path_arg(&missing)])
        .output()
        .expect("coljoin");
    assert_eq!(join.status.code(), Some(1));
    assert!(join.stdout.is_empty());
    let error = parse_json_line(&join.stderr);
    assert_eq!(error["error"]["kind"], "NotFound");
    assert_eq!(error["error"]["path"], path_arg(&missing));

    let template = temp.path().join("c%d");
    let split = colsplit()
        .args([",", path_arg(&missing), path_arg(&template)])
        .output()
        .expect("colsplit");
    assert_eq!(split.status.code(), Some(1));
}

#[test]
fn usage_errors_exit_with_one() {
    let join = coljoin().arg(",").output().expect("coljoin");
    assert_eq!(join.status.code(), Some(1));
    let error = parse_json_line(&join.stderr);
    assert_eq!(error["error"]["kind"], "Usage");

    let split = colsplit().args([",", "only-input"]).output().expect("colsplit");
    assert_eq!(split.status.code(), Some(1));

    let empty_sep = coljoin().args(["", "a.txt"]).output().expect("coljoin");
    assert_eq!(empty_sep.status.code(), Some(1));
}

#[test]
fn bad_template_is_rejected_before_reading_input() {
    let temp = tempfile::tempdir().expect("tempdir");
    let table = temp.path().join("table.csv");
    fs::write(&table, "1,a\n").unwrap();

    let split = colsplit()
        .args([",", path_arg(&table), "no-placeholder.txt"])
        .output()
        .expect("colsplit");
    assert_eq!(split.status.code(), Some(1));
    let error = parse_json_line(&split.stderr);
    assert_eq!(error["error"]["kind"], "Usage");
    assert!(!Path::new("no-placeholder.txt").exists());
}

#[test]
fn help_exits_zero() {
    let help = coljoin().arg("--help").output().expect("coljoin");
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("SEPARATOR"));
}

#[test]
fn double_dash_is_a_literal_separator() {
    let temp = tempfile::tempdir().expect("tempdir");
    let a = temp.path().join("a.txt");
    let b = temp.path().join("b.txt");
    fs::write(&a, "x\ny\n").unwrap();
    fs::write(&b, "1\n2--3\n").unwrap();

    for args in [
        vec!["--", path_arg(&a), path_arg(&b)],
        vec!["--", "--", path_arg(&a), path_arg(&b)],
    ] {
        let join = coljoin().args(&args).output().expect("coljoin");
        assert!(join.status.success());
        assert_eq!(join.stdout, b"x--1\ny--\"2--3\"\n");
    }

    let table = temp.path().join("table.txt");
    fs::write(&table, "x--1\ny--\"2--3\"\n").unwrap();
    let template = temp.path().join("c%d");
    let split = colsplit()
        .args(["--color", "never", "--", path_arg(&table), path_arg(&template)])
        .output()
        .expect("colsplit");
    assert!(split.status.success());
    assert_eq!(fs::read(temp.path().join("c0")).unwrap(), b"x\ny\n");
    assert_eq!(fs::read(temp.path().join("c1")).unwrap(), b"1\n2--3\n");
}

#[test]
fn hyphenated_separator_and_inputs_are_positional() {
    let temp = tempfile::tempdir().expect("tempdir");
    let a = temp.path().join("-a.txt");
    fs::write(&a, "p\nq\n").unwrap();

    let join = coljoin()
        .current_dir(temp.path())
        .args(["-x", "-a.txt", "-a.txt"])
        .output()
        .expect("coljoin");
    assert!(join.status.success());
    assert_eq!(join.stdout, b"p-xp\nq-xq\n");
}
