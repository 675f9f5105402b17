use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixture directory present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("routeplot");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("ROUTEPLOT_DATA_DIR")
        .arg("--data-dir")
        .arg(fixtures_dir());
    cmd
}

#[test]
fn route_prints_labelled_waypoints() {
    cli()
        .args(["route", "Budapest", "Szeged", "Debrecen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("START  Budapest"))
        .stdout(predicate::str::contains(" VIA   Szeged"))
        .stdout(predicate::str::contains(" END   Debrecen"))
        .stdout(predicate::str::contains("Total distance: 22.50"));
}

#[test]
fn route_with_heap_algorithm_matches() {
    cli()
        .args(["route", "Budapest", "Szeged", "--algorithm", "heap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: heap"))
        .stdout(predicate::str::contains("Total distance: 10.00"));
}

#[test]
fn route_skips_unreachable_leg() {
    cli()
        .args(["route", "Budapest", "Szolnok", "Pecs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no path: Szolnok -> Pecs"))
        .stdout(predicate::str::contains("Total distance: 5.00"));
}

#[test]
fn route_resumes_after_unreachable_pairs_without_joining() {
    cli()
        .args(["route", "Budapest", "Szolnok", "Pecs", "Kecskemet", "Szeged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("via: Budapest -> Szolnok\n"))
        .stdout(predicate::str::contains("RESUME Kecskemet"))
        .stdout(predicate::str::contains("via: Kecskemet -> Szeged\n"))
        .stdout(predicate::str::contains("Szolnok -> Kecskemet").not())
        .stdout(predicate::str::contains("Total distance: 7.00"));
}

#[test]
fn plain_format_uses_library_layout() {
    cli()
        .args(["--format", "plain", "route", "Budapest", "Szolnok", "Pecs", "Kecskemet", "Szeged"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Route: 7.00 total over 2 hops"))
        .stdout(predicate::str::contains("Path: Budapest -> Szolnok\n"))
        .stdout(predicate::str::contains("Resume Kecskemet"))
        .stdout(predicate::str::contains("Path: Kecskemet -> Szeged\n"))
        .stdout(predicate::str::contains("No path: Szolnok -> Pecs"))
        .stdout(predicate::str::contains("No path: Pecs -> Kecskemet"));
}

#[test]
fn route_requires_two_waypoints() {
    cli().args(["route", "Budapest"]).assert().failure();
}

#[test]
fn unknown_location_error_is_friendly() {
    cli()
        .args(["route", "Budapest", "Szegd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location name: Szegd"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn path_command_reports_unreachable_pairs() {
    cli()
        .args(["path", "--from", "Budapest", "--to", "Pecs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no path found between Budapest and Pecs"));
}

#[test]
fn path_command_json_output() {
    let output = cli()
        .args(["--format", "json", "path", "--from", "Budapest", "--to", "Szeged"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["total_distance"], 10.0);
    let names: Vec<_> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Budapest", "Szolnok", "Kecskemet", "Szeged"]);
}
