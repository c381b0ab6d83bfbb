//! Integration tests for commands that read or edit the stored network.

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(db: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("routewise");
    cmd.env("RUST_LOG", "error")
        .env_remove("ROUTEWISE_DB")
        .arg("--db")
        .arg(db);
    cmd
}

fn initialized() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let db = temp_dir.path().join("nested").join("routewise.db");
    cli(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database ready at"))
        .stdout(predicate::str::contains("(0 locations, 0 links)"));
    (temp_dir, db)
}

#[test]
fn missing_database_suggests_init() {
    let temp_dir = TempDir::new().expect("create temp dir");
    cli(&temp_dir.path().join("absent.db"))
        .arg("cities")
        .assert()
        .failure()
        .stderr(predicate::str::contains("routewise init"));
}

#[test]
fn cities_are_listed_by_name() {
    let (_temp, db) = initialized();
    for name in ["Sharjah", "Dubai"] {
        cli(&db).args(["add-city", name]).assert().success();
    }

    let output = cli(&db).arg("cities").output().expect("run cities");
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("Locations (2):"));
    assert!(stdout.find("Dubai").unwrap() < stdout.find("Sharjah").unwrap());
}

#[test]
fn duplicate_city_is_rejected() {
    let (_temp, db) = initialized();
    cli(&db).args(["add-city", "Dubai"]).assert().success();
    cli(&db)
        .args(["add-city", "Dubai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("names must be unique"));
}

#[test]
fn add_link_reports_derived_time_and_lists_it() {
    let (_temp, db) = initialized();
    for name in ["Dubai", "Sharjah"] {
        cli(&db).args(["add-city", name]).assert().success();
    }
    cli(&db)
        .args(["add-link", "--from", "Dubai", "--to", "Sharjah"])
        .args(["--distance", "30", "--mode", "bus"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dubai -> Sharjah (30.0 km by BUS, 30m)",
        ));

    let output = cli(&db)
        .args(["--format", "json", "links"])
        .output()
        .expect("run links");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value[0]["from_city"], "Dubai");
    assert_eq!(value[0]["mode"], "BUS");
    assert_eq!(value[0]["time_minutes"], 30.0);
}

#[test]
fn add_link_rejects_invalid_input() {
    let (_temp, db) = initialized();
    for name in ["Dubai", "Sharjah"] {
        cli(&db).args(["add-city", name]).assert().success();
    }

    cli(&db)
        .args(["add-link", "--from", "Dubai", "--to", "Sharjah"])
        .args(["--distance", "0", "--mode", "CAR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid link distance"));

    cli(&db)
        .args(["add-link", "--from", "Dubai", "--to", "Sharjah"])
        .args(["--distance", "10", "--mode", "BOAT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported transport mode 'BOAT'"));

    cli(&db)
        .args(["add-link", "--from", "Dubay", "--to", "Sharjah"])
        .args(["--distance", "10", "--mode", "CAR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown location 'Dubay'"));

    cli(&db)
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("No links stored."));
}
