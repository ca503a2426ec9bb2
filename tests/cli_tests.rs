//! Black-box tests of the `fleetledger` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A workspace with a config pointing at a database inside it.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let db_path = dir.path().join("fleet.db");
        let config = format!("[database]\npath = \"{}\"\n", db_path.display());
        std::fs::write(dir.path().join("fleetledger.toml"), config).expect("write config");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fleetledger").expect("binary exists");
        cmd.current_dir(self.dir.path());
        cmd
    }
}

#[test]
fn init_creates_the_database() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("database ready"));

    assert!(ws.dir.path().join("fleet.db").exists());
}

#[test]
fn commands_fail_clearly_without_init() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["vehicle", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `fleetledger init` first"));
}

#[test]
fn vehicle_add_and_list_roundtrip() {
    let ws = Workspace::new();
    ws.cmd().arg("init").assert().success();

    ws.cmd()
        .args([
            "vehicle",
            "add",
            "ab123cd",
            "toyota",
            "camry",
            "--year",
            "2020",
            "--daily-rate",
            "50.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB123CD"));

    ws.cmd()
        .args(["vehicle", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB123CD"))
        .stdout(predicate::str::contains("available"));
}

#[test]
fn invalid_vehicle_input_reports_the_field() {
    let ws = Workspace::new();
    ws.cmd().arg("init").assert().success();

    ws.cmd()
        .args([
            "vehicle",
            "add",
            "ab123cd",
            "toyota",
            "camry",
            "--year",
            "1850",
            "--daily-rate",
            "50",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("year"));
}

#[test]
fn full_rental_flow_through_the_cli() {
    let ws = Workspace::new();
    ws.cmd().arg("init").assert().success();

    ws.cmd()
        .args([
            "vehicle", "add", "AB1", "kia", "rio", "--year", "2020", "--daily-rate", "30",
        ])
        .assert()
        .success();
    ws.cmd()
        .args(["client", "add", "Ana", "Pop", "ana@example.com"])
        .assert()
        .success();

    ws.cmd()
        .args(["rental", "start", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rental 1 started"));

    // double-booking fails with the dedicated message
    ws.cmd()
        .args(["rental", "start", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has an active rental"));

    ws.cmd()
        .args(["rental", "return", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rental 1 completed"));

    // and then the vehicle can go out again
    ws.cmd().args(["rental", "start", "1", "1"]).assert().success();

    ws.cmd()
        .args(["rental", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"))
        .stdout(predicate::str::contains("active"));
}

#[test]
fn set_status_blocks_rentals() {
    let ws = Workspace::new();
    ws.cmd().arg("init").assert().success();

    ws.cmd()
        .args([
            "vehicle", "add", "AB1", "kia", "rio", "--year", "2020", "--daily-rate", "30",
        ])
        .assert()
        .success();
    ws.cmd()
        .args(["client", "add", "Ana", "Pop", "ana@example.com"])
        .assert()
        .success();

    ws.cmd()
        .args(["vehicle", "set-status", "1", "maintenance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maintenance"));

    ws.cmd()
        .args(["rental", "start", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn report_emits_json() {
    let ws = Workspace::new();
    ws.cmd().arg("init").assert().success();

    ws.cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generated_at\""))
        .stdout(predicate::str::contains("\"vehicles\""));
}

#[test]
fn malformed_config_fails_fast() {
    let ws = Workspace::new();
    std::fs::write(
        ws.dir.path().join("fleetledger.toml"),
        "[logging]\nformat = \"xml\"\n",
    )
    .expect("write config");

    ws.cmd()
        .args(["vehicle", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.format"));
}
