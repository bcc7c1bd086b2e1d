#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn profile(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sensation-profile").unwrap();
    cmd.current_dir(dir.path())
        .env("SENSATION_PROFILE_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

const CLIENT: &str = "\
probe;1416835751492;3;0.5
send;1416835751495;{ Message: Type = Vibration; Vibration = { Vibration: TargetRegion = Chest; ActorIndex = 3; Intensity = 0.5; Priority = 0; }; MuscleStimulation = null; LoadPattern = null; PlayPattern = null; }
";

const SERVER_PREFIX: &str = "\
parse;1416835753960;type: VIBRATION;vibration {;  target_region: CHEST;  actor_index: 3;  intensity: 0.5;  priority: 0;};
process;1416835753975;target_region: CHEST;actor_index: 3;intensity: 0.5;priority: 0;
set_intensity;1416835753981;3;0.5;0;0.9;delayed;2000
";

fn write_logs(dir: &TempDir, set_pwm: &str) {
    std::fs::write(dir.path().join("sensation_profile_20141124_1409.txt"), CLIENT).unwrap();
    std::fs::write(
        dir.path().join("sensation_server_profile_20141124_1409.txt"),
        format!("{SERVER_PREFIX}{set_pwm}\n"),
    )
    .unwrap();
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_writes_one_row_per_complete_sequence() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5474873734152916");

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read 6 commands"))
        .stdout(predicate::str::contains("Grouped into 1 sequences"))
        .stdout(predicate::str::contains("0 'malformed' sequences - 1 sequences remaining"));

    let table = read(&dir, "out.csv");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "Actor;Intensity;Probe;Send;Parse;Process;Set_intensity;Set_pwm;Delay"
    );
    assert_eq!(
        lines[1],
        "3;0,5;1416835751492;1416835751495;1416835753960;1416835753975;1416835753981;1416835753990;0,2"
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn run_rejects_groups_split_by_mismatched_pwm() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.33");

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grouped into 2 sequences"))
        .stdout(predicate::str::contains("Rejected 2 'malformed' sequences - 0 sequences remaining"));

    assert_eq!(read(&dir, "out.csv").lines().count(), 1);
}

#[test]
fn run_names_output_after_current_minute() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5474873734152916");

    profile(&dir).arg("run").assert().success();

    let written: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("profile_") && n.ends_with(".csv"))
        .collect();
    assert_eq!(written.len(), 1);
    // profile_YYYYmmdd_HHMM.csv
    assert_eq!(written[0].len(), "profile_20141124_1409.csv".len());
}

#[test]
fn run_json_reports_counts() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5474873734152916");

    let output = profile(&dir)
        .args(["run", "--output", "out.csv", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["read"], 6);
    assert_eq!(json["sequences"], 1);
    assert_eq!(json["rejected"], 0);
    assert_eq!(json["remaining"], 1);
    assert_eq!(json["mean_latency_ms"], 2498.0);
    assert!(json["integrity_warnings"].as_array().unwrap().is_empty());
}

#[test]
fn run_fails_without_client_logs() {
    let dir = TempDir::new().unwrap();

    profile(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no client logs found"));
}

#[test]
fn run_fails_on_malformed_line() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5");
    std::fs::write(
        dir.path().join("sensation_profile_20141124_1409.txt"),
        "probe;1416835751492;3;0.5\nprobe;141683575;3;0.5\n",
    )
    .unwrap();

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(":2: pattern for 'probe' not matching"));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn run_fails_on_pwm_below_motor_minimum() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.2");

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            ":4: set_pwm value 0.2 cannot be produced by the motor curve",
        ));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn run_fails_on_unknown_action() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5");
    std::fs::write(
        dir.path().join("sensation_profile_20141124_1409.txt"),
        "vibrate;1416835751492;3;0.5\n",
    )
    .unwrap();

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pattern registered for action 'vibrate'"));
}

#[test]
fn run_prompts_when_several_logs_match() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5474873734152916");
    std::fs::write(
        dir.path().join("sensation_profile_20141124_1500.txt"),
        "probe;1416835751492;3;0.5\n",
    )
    .unwrap();

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .write_stdin("0\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("1\tsensation_profile_20141124_1500.txt"))
        .stdout(predicate::str::contains("1 sequences remaining"));
}

#[test]
fn run_latest_picks_newest_log() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5474873734152916");
    std::fs::write(
        dir.path().join("sensation_profile_20141124_1500.txt"),
        "probe;1416835751492;3;0.5\n",
    )
    .unwrap();

    profile(&dir)
        .args(["run", "--latest", "--output", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read 5 commands"));
}

#[test]
fn run_rejects_bad_selection() {
    let dir = TempDir::new().unwrap();
    write_logs(&dir, "set_pwm;1416835753990;3;0.5");
    std::fs::write(
        dir.path().join("sensation_profile_20141124_1500.txt"),
        "probe;1416835751492;3;0.5\n",
    )
    .unwrap();

    profile(&dir)
        .args(["run", "--output", "out.csv"])
        .write_stdin("7\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selection '7'"));
}

#[test]
fn run_accepts_explicit_log_paths() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("client.log"), CLIENT).unwrap();
    std::fs::write(
        dir.path().join("server.log"),
        format!("{SERVER_PREFIX}set_pwm;1416835753990;3;0.5474873734152916\n"),
    )
    .unwrap();

    profile(&dir)
        .args([
            "run",
            "--client",
            "client.log",
            "--server",
            "server.log",
            "--output",
            "out.csv",
        ])
        .assert()
        .success();
    assert_eq!(read(&dir, "out.csv").lines().count(), 2);
}

#[test]
fn run_uses_curve_overrides() {
    let dir = TempDir::new().unwrap();
    // 0.5 logical on a square curve without a minimum drive is 0.25 PWM
    write_logs(&dir, "set_pwm;1416835753990;3;0.25");

    profile(&dir)
        .args([
            "run",
            "--min-intensity",
            "0",
            "--curve-degree",
            "2",
            "--output",
            "out.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sequences remaining"));
}

// ---------------------------------------------------------------------------
// map
// ---------------------------------------------------------------------------

#[test]
fn map_inverse_maps_pwm_values() {
    let dir = TempDir::new().unwrap();

    profile(&dir)
        .args(["map", "0.5", "0.00000005"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4337984"))
        .stdout(predicate::str::contains("0.0000001"));
}

#[test]
fn map_refuses_pwm_below_motor_minimum() {
    let dir = TempDir::new().unwrap();

    profile(&dir)
        .args(["map", "0.5", "0.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("set_pwm value 0.2"))
        .stderr(predicate::str::contains("min_intensity 0.3"))
        .stdout(predicate::str::contains("NaN").not());
}

#[test]
fn map_json_flags_unmapped_values() {
    let dir = TempDir::new().unwrap();

    let output = profile(&dir)
        .args(["map", "0.00000005", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json[0]["mapped"], false);
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_show_reads_profile_yaml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("profile.yaml"), "motor:\n  curve_degree: 2.5\n").unwrap();

    let output = profile(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["motor"]["curve_degree"], 2.5);
    assert_eq!(json["motor"]["min_intensity"], 0.3);
}

#[test]
fn config_validate_passes_defaults() {
    let dir = TempDir::new().unwrap();

    profile(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_bad_curve() {
    let dir = TempDir::new().unwrap();

    profile(&dir)
        .args(["config", "validate", "--curve-degree", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("motor.curve_degree"));
}
