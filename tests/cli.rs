use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const FS: f64 = 500.0;

/// Header row plus `leads` rows; lead II carries beats at `beats_s`.
fn write_recording(path: &Path, leads: usize, seconds: f64, beats_s: &[f64]) {
    let n = (seconds * FS) as usize;
    let mut csv = String::from("lead");
    for i in 0..n {
        write!(csv, ",s{i}").unwrap();
    }
    csv.push('\n');

    for lead in 0..leads {
        write!(csv, "L{lead}").unwrap();
        for i in 0..n {
            let v: f64 = if lead == 1 {
                beats_s
                    .iter()
                    .map(|c| {
                        let d = (i as f64 - c * FS) / 5.0;
                        (-0.5 * d * d).exp()
                    })
                    .sum()
            } else {
                0.0
            };
            write!(csv, ",{v:.6}").unwrap();
        }
        csv.push('\n');
    }
    fs::write(path, csv).unwrap();
}

fn ecg_pulser() -> Command {
    Command::cargo_bin("ecg-pulser").unwrap()
}

#[test]
fn writes_peaks_and_intervals() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ecg.csv");
    let output = dir.path().join("out.json");
    write_recording(&input, 12, 10.0, &[1.0, 3.0, 5.0, 7.0, 9.0]);

    ecg_pulser().arg(&input).arg(&output).assert().success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(v["peaks"]["R"], serde_json::json!([500, 1500, 2500, 3500, 4500]));
    assert_eq!(v["intervals"]["RR"], serde_json::json!([2.0, 2.0, 2.0, 2.0]));
}

#[test]
fn missing_arguments_is_usage_error() {
    ecg_pulser().assert().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_succeeds() {
    ecg_pulser().arg("--help").assert().success();
}

#[test]
fn unreadable_csv() {
    let dir = tempfile::tempdir().unwrap();
    ecg_pulser()
        .arg(dir.path().join("missing.csv"))
        .arg(dir.path().join("out.json"))
        .assert()
        .code(2);
}

#[test]
fn unwritable_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ecg.csv");
    write_recording(&input, 2, 4.0, &[1.0, 2.0]);

    ecg_pulser()
        .arg(&input)
        .arg(dir.path().join("no-such-dir").join("out.json"))
        .assert()
        .code(3);
}

#[test]
fn lead_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ecg.csv");
    write_recording(&input, 12, 2.0, &[1.0]);

    ecg_pulser()
        .arg(&input)
        .arg(dir.path().join("out.json"))
        .args(["--lead", "12"])
        .assert()
        .code(5);
}

#[test]
fn degenerate_sampling_rate_fails_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ecg.csv");
    let output = dir.path().join("out.json");
    write_recording(&input, 2, 2.0, &[1.0]);

    ecg_pulser()
        .arg(&input)
        .arg(&output)
        .args(["--sampling-rate", "1"])
        .assert()
        .code(6);
    assert!(!output.exists());
}
