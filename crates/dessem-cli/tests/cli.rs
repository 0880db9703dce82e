//! End-to-end tests for the `dessem` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use dessem_encoder::HidrEncoder;
use dessem_types::{HydroPlantRecord, MachineSets};
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn plant(station_id: i32, name: &str, downstream: i32, units: i32, power: f64) -> HydroPlantRecord {
    HydroPlantRecord {
        name: name.to_string(),
        station_id,
        subsystem_id: 1,
        downstream_station_id: downstream,
        min_volume: 100.0,
        max_volume: 600.0,
        machine_sets: MachineSets {
            active_count: 1,
            unit_count: [units, 0, 0, 0, 0],
            effective_power: [power, 0.0, 0.0, 0.0, 0.0],
            effective_head: [25.5, 0.0, 0.0, 0.0, 0.0],
            effective_flow: [110, 0, 0, 0, 0],
        },
        ..HydroPlantRecord::default()
    }
}

fn write_registry(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("HIDR.DAT");
    HidrEncoder::new()
        .add_record(plant(1, "CAMARGOS", 2, 2, 23.0))
        .add_placeholder()
        .add_record(plant(2, "ITUTINGA", 0, 4, 13.0))
        .write_to(&path)
        .unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn inspect_lists_every_record() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    cargo_bin_cmd!("dessem")
        .args(["inspect", arg(&file), "--sets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records (2 plants, 1 placeholder)"))
        .stdout(predicate::str::contains(
            "Record 0: #1 CAMARGOS subsystem=1 downstream=2 sets=1 capacity=46.0 MW",
        ))
        .stdout(predicate::str::contains("Record 1: (placeholder)"))
        .stdout(predicate::str::contains("set 1: 4 units x 13.0 MW"));
}

#[test]
fn inspect_rejects_out_of_range_record() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    cargo_bin_cmd!("dessem")
        .args(["inspect", arg(&file), "--record", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record 7 out of range"));
}

#[test]
fn inspect_dumps_reserved_span() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    cargo_bin_cmd!("dessem")
        .args(["inspect", arg(&file), "--record", "0", "--show-reserved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reserved:"))
        .stdout(predicate::str::contains("0120  00 00"))
        .stdout(predicate::str::contains("Record 2").not());
}

#[test]
fn validate_accepts_well_formed_file() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    cargo_bin_cmd!("dessem")
        .args(["validate", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Length: 2376 bytes = 3 records"))
        .stdout(predicate::str::contains("✓ Cascade: all downstream links resolve"));
}

#[test]
fn validate_rejects_trailing_fragment() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);
    let mut bytes = fs::read(&file).unwrap();
    bytes.push(0);
    fs::write(&file, bytes).unwrap();

    cargo_bin_cmd!("dessem")
        .args(["validate", arg(&file)])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ Length"))
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn decode_then_encode_reproduces_file() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);
    let json = dir.path().join("hidr.json");
    let rebuilt = dir.path().join("REBUILT.DAT");

    cargo_bin_cmd!("dessem")
        .args(["decode", arg(&file), "-o", arg(&json), "--pretty"])
        .assert()
        .success();
    cargo_bin_cmd!("dessem")
        .args(["encode", arg(&json), "-o", arg(&rebuilt)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2376 bytes"));

    assert_eq!(fs::read(&file).unwrap(), fs::read(&rebuilt).unwrap());
}

#[test]
fn decode_can_skip_placeholders() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    let output = cargo_bin_cmd!("dessem")
        .args(["decode", arg(&file), "--skip-placeholders"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<i64> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["station_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn stats_totals_capacity() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);

    cargo_bin_cmd!("dessem")
        .args(["stats", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 total, 2 plants, 1 placeholders"))
        .stdout(predicate::str::contains("98.0"));
}

#[test]
fn stats_sums_units_past_i32_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("HIDR.DAT");
    HidrEncoder::new()
        .add_record(plant(1, "GRANDE", 0, i32::MAX, 1.0))
        .add_record(plant(2, "MAIOR", 0, i32::MAX, 1.0))
        .write_to(&path)
        .unwrap();

    cargo_bin_cmd!("dessem")
        .args(["stats", arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("4294967294"));
}

#[test]
fn snapshot_write_read_and_verify() {
    let dir = tempdir().unwrap();
    let file = write_registry(&dir);
    let snap = dir.path().join("hidr.hsn");

    cargo_bin_cmd!("dessem")
        .args(["snapshot", arg(&file), "-o", arg(&snap), "--compress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records"));

    cargo_bin_cmd!("dessem")
        .args(["snapshot", "--read", arg(&snap), "--verify", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records:  3 (2 plants)"))
        .stdout(predicate::str::contains("✓ Source matches"));

    let mut bytes = fs::read(&file).unwrap();
    bytes[0] = b'X';
    fs::write(&file, bytes).unwrap();

    cargo_bin_cmd!("dessem")
        .args(["snapshot", "--read", arg(&snap), "--verify", arg(&file)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ source digest mismatch"));
}

#[test]
fn missing_file_reports_context() {
    cargo_bin_cmd!("dessem")
        .args(["validate", "/nonexistent/HIDR.DAT"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: cannot read"));
}
