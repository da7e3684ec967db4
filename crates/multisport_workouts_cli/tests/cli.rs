//! Runs the `multisport-workouts` binary against segment files in a temp dir.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multisport-workouts"));
    cmd.env_remove("MULTISPORT_WORKOUTS_NAME")
        .env_remove("MULTISPORT_WORKOUTS_SPORT")
        .env_remove("MULTISPORT_WORKOUTS_DESCRIPTION")
        .env("MULTISPORT_WORKOUTS_LOG_LEVEL", "warn");
    cmd
}

fn write_segments(dir: &Path, value: Value) -> PathBuf {
    let path = dir.join("segments.json");
    std::fs::write(&path, value.to_string()).expect("write fixture");
    path
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn interval_session() -> Value {
    json!([{
        "type": "group",
        "id": "g",
        "repeatCount": 3,
        "segments": [
            { "type": "individual", "id": "on", "name": "On", "discipline": "run", "zone": 5,
              "target_duration_seconds": 120, "target_distance_meters": 50 },
            { "type": "individual", "id": "off", "name": "Off", "discipline": "run", "zone": 1,
              "target_duration_seconds": 60, "rest_seconds": 30 }
        ]
    }])
}

#[test]
fn export_prints_garmin_workout() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(temp.path(), interval_session());

    let output = bin()
        .arg("export")
        .arg(&input)
        .args(["--name", "Intervals", "--sport", "cycling"])
        .output()
        .unwrap();
    let workout = stdout_json(&output);

    assert_eq!(workout["workoutName"], "Intervals");
    assert_eq!(workout["sport"], "CYCLING");
    assert_eq!(workout["estimatedDurationInSecs"], 630.0);
    assert_eq!(workout["estimatedDistanceInMeters"], 150.0);
    let step = &workout["segments"][0]["steps"][0];
    assert_eq!(step["type"], "WorkoutRepeatStep");
    assert_eq!(step["repeatValue"], 3);
    assert_eq!(step["steps"][1]["intensity"], "RECOVERY");
}

#[test]
fn export_reads_options_from_environment_and_writes_file() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(temp.path(), interval_session());
    let target = temp.path().join("garmin.json");

    let output = bin()
        .env("MULTISPORT_WORKOUTS_NAME", "From env")
        .env("MULTISPORT_WORKOUTS_SPORT", "RUNNING")
        .env("MULTISPORT_WORKOUTS_DESCRIPTION", "Track session")
        .arg("export")
        .arg(&input)
        .arg("--output")
        .arg(&target)
        .arg("--pretty")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let workout: Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(workout["workoutName"], "From env");
    assert_eq!(workout["sport"], "RUNNING");
    assert_eq!(workout["description"], "Track session");
}

#[test]
fn summary_prints_totals() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(temp.path(), interval_session());

    let output = bin().arg("summary").arg(&input).output().unwrap();
    let totals = stdout_json(&output);

    assert_eq!(
        totals,
        json!({
            "totalDistanceMeters": 150.0,
            "totalDurationSeconds": 540.0,
            "totalWeight": 540.0,
            "totalSegmentCount": 6
        })
    );
}

#[test]
fn convert_retargets_discipline() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(temp.path(), interval_session());

    let output = bin()
        .arg("convert")
        .arg(&input)
        .args(["--discipline", "bike"])
        .output()
        .unwrap();
    let converted = stdout_json(&output);

    let children = converted[0]["segments"].as_array().unwrap();
    assert_eq!(converted[0]["repeatCount"], 3);
    assert!(children.iter().all(|c| c["discipline"] == "bike"));
    assert!(children[0].get("target_distance_meters").is_none());
}

#[test]
fn convert_fails_when_zone_does_not_exist_in_target() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(
        temp.path(),
        json!([{ "type": "individual", "id": "b", "name": "Sprint", "discipline": "bike", "zone": 7 }]),
    );

    let output = bin()
        .arg("convert")
        .arg(&input)
        .args(["--discipline", "run"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("zone"));
}

#[test]
fn invalid_input_fails() {
    let temp = TempDir::new().unwrap();
    let input = write_segments(
        temp.path(),
        json!([{ "type": "group", "id": "g", "repeatCount": 2, "segments": [] }]),
    );

    let output = bin().arg("summary").arg(&input).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least one segment"));
}

#[test]
fn schema_prints_json_schema() {
    let output = bin().arg("schema").output().unwrap();
    let schema = stdout_json(&output);
    assert_eq!(schema["type"], "array");
}
