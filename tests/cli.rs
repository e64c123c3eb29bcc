#![forbid(unsafe_code)]
use assert_cmd::Command;
use escala::{JsonStorage, Storage};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("escala-cli").unwrap();
    cmd.env_remove("ESCALA_STORE").arg("--store").arg(store);
    cmd
}

#[test]
fn generate_then_summary() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");

    cli(&store)
        .args(["generate", "--from", "2024-01-01", "--to", "2024-01-04"])
        .args(["--pattern", "12x36", "--start-time", "07:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12-on/36-off: 2 record(s) generated"));

    let records = JsonStorage::open(&store).unwrap().load().unwrap();
    assert_eq!(records.len(), 2);

    cli(&store)
        .args(["summary", "--month", "2024-01", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workedHours\": 24.0"))
        .stdout(predicate::str::contains("\"remainingHours\": 153.0"));
}

#[test]
fn unknown_pattern_fails() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");

    cli(&store)
        .args(["generate", "--from", "2024-01-01", "--to", "2024-01-04"])
        .args(["--pattern", "24x72"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rotation pattern: 24x72"));
    assert!(!store.exists());
}

#[test]
fn malformed_start_time_fails() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");

    cli(&store)
        .args(["generate", "--from", "2024-01-01", "--to", "2024-01-04"])
        .args(["--start-time", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed time"));
}

#[test]
fn add_overlap_then_check() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");

    cli(&store)
        .args(["add", "--date", "2024-03-01", "--start", "22:00", "--end", "06:00"])
        .args(["--type", "extra"])
        .assert()
        .success();

    cli(&store)
        .args(["add", "--date", "2024-03-02", "--start", "05:00", "--end", "09:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps"));

    cli(&store)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn check_reports_conflicts_with_code_two() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");
    fs::write(
        &store,
        r#"[
  {"id":"a","date":"2024-03-01","startTime":"07:00","endTime":"19:00","totalHours":12,"type":"ordinary"},
  {"id":"b","date":"2024-03-01","startTime":"18:00","endTime":"20:00","totalHours":2,"type":"extra"}
]"#,
    )
    .unwrap();

    cli(&store)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2024-03-01 overlap a b"));
}

#[test]
fn update_and_delete_by_id() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");

    let out = cli(&store)
        .args(["add", "--date", "2024-03-05", "--start", "07:00", "--end", "19:00"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = String::from_utf8(out).unwrap().trim().to_string();

    cli(&store)
        .args(["update", "--id", &id, "--end", "13:00"])
        .assert()
        .success();
    let records = JsonStorage::open(&store).unwrap().load().unwrap();
    assert_eq!(records[0].total_hours, 6.0);

    cli(&store).args(["delete", "--id", &id]).assert().success();
    cli(&store)
        .args(["delete", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shift"));
}

#[test]
fn import_and_list_month() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("escala.json");
    let csv = dir.path().join("in.csv");
    fs::write(
        &csv,
        "date,start_time,end_time,type\n2024-02-29,20:00,08:00,regular\n",
    )
    .unwrap();

    cli(&store)
        .args(["import", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 record(s) imported"));

    cli(&store)
        .args(["list", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01 00:00 → 08:00 | 8h | ordinary"))
        .stdout(predicate::str::contains("2024-02-29").not());
}
