use std::path::{Path, PathBuf};

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

/// Temp database holding Dubai, AbuDhabi, Sharjah and an isolated Fujairah.
fn seeded_db() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let db = temp_dir.path().join("routewise.db");

    cli(&db).arg("init").assert().success();
    for name in ["Dubai", "AbuDhabi", "Sharjah", "Fujairah"] {
        cli(&db).args(["add-city", name]).assert().success();
    }
    for (from, to, distance, mode) in [
        ("Dubai", "AbuDhabi", "140", "CAR"),
        ("Dubai", "Sharjah", "30", "CAR"),
        ("Sharjah", "AbuDhabi", "160", "BUS"),
    ] {
        cli(&db)
            .args(["add-link", "--from", from, "--to", to])
            .args(["--distance", distance, "--mode", mode])
            .assert()
            .success();
    }
    (temp_dir, db)
}

#[test]
fn route_prints_distance_optimal_path() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["route", "--from", "Dubai", "--to", "AbuDhabi"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Shortest route from Dubai to AbuDhabi (1 hops; optimized for distance)",
        ))
        .stdout(predicate::str::contains("Total distance: 140.0 km"));
}

#[test]
fn heap_strategy_prints_the_same_route() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["route", "--from", "Sharjah", "--to", "AbuDhabi", "--strategy", "heap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total distance: 160.0 km"));
}

#[test]
fn unknown_strategy_is_rejected_by_the_parser() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["route", "--from", "Dubai", "--to", "AbuDhabi", "--strategy", "astar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected scan or heap"));
}

#[test]
fn compare_lists_three_options_in_order() {
    let (_temp, db) = seeded_db();
    let output = cli(&db)
        .args(["compare", "--from", "Dubai", "--to", "AbuDhabi"])
        .output()
        .expect("run compare");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 output");
    let fastest = stdout.find("Fastest route").expect("fastest option");
    let cheapest = stdout.find("Cheapest route").expect("cheapest option");
    let greenest = stdout.find("Eco-friendliest route").expect("eco option");
    assert!(fastest < cheapest && cheapest < greenest);
    assert!(stdout.contains("Estimated cost: 39.00 AED"));
}

#[test]
fn compare_json_is_machine_readable() {
    let (_temp, db) = seeded_db();
    let output = cli(&db)
        .args(["--format", "json", "compare", "--from", "Dubai", "--to", "AbuDhabi"])
        .output()
        .expect("run compare");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let criteria: Vec<_> = value["options"]
        .as_array()
        .expect("options array")
        .iter()
        .map(|option| option["criterion"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(criteria, vec!["time", "cost", "emissions"]);
}

#[test]
fn compare_without_connection_reports_no_routes() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["compare", "--from", "Dubai", "--to", "Fujairah"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No routes available between Dubai and Fujairah.",
        ));
}

#[test]
fn unreachable_route_fails_with_hint() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["route", "--from", "Dubai", "--to", "Fujairah"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between Dubai and Fujairah",
        ));
}

#[test]
fn unknown_location_error_is_friendly() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["route", "--from", "Dubai", "--to", "Sharja"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown location 'Sharja'"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn same_endpoint_is_rejected() {
    let (_temp, db) = seeded_db();
    cli(&db)
        .args(["compare", "--from", "Dubai", "--to", "Dubai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Origin and destination are both 'Dubai'"));
}
