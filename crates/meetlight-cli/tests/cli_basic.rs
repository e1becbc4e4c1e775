//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at a fresh directory so no real config is touched.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const EVENTS: &str = r#"[
    {"summary": "Standup",
     "start": {"dateTime": "2024-03-15T21:03:00+09:00"},
     "end": {"dateTime": "2024-03-15T21:15:00+09:00"}},
    {"start": {"date": "2024-03-16"}, "end": {"date": "2024-03-17"}},
    {"start": {"dateTime": "2024-03-15T13:30:00+00:00"},
     "end": {"dateTime": "2024-03-15T14:00:00+00:00"}}
]"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "meetlight-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("MEETLIGHT_ENV")
        .env_remove("MEETLIGHT_TOKEN")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_parse_prints_epoch_seconds() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["parse", "2024-03-15T21:00:00+09:00"]);
    assert_eq!(code, 0);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("1710504000"));
    assert_eq!(lines.next(), Some("2024-03-15T12:00:00Z"));
}

#[test]
fn test_parse_rejects_utc_suffix() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["parse", "2024-03-15T12:00:00Z"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_check_reports_alert_and_rows() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, EVENTS).unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["check", "--file", file.to_str().unwrap(), "--now", "1710504000"],
    );
    assert_eq!(code, 0, "check failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["alert"], "soon");
    assert_eq!(report["color"], serde_json::json!([255, 255, 0]));
    assert_eq!(report["accepted"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["rows"][0]["summary"], "Standup");
    assert_eq!(report["rows"][0]["countdown"], "in 3m");
    assert_eq!(report["rows"][1]["summary"], "Untitled");
    assert_eq!(report["rows"][1]["countdown"], "in 1h 30m");
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["config", "set", "proximity.max_rows", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "proximity.max_rows"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "indicator.brightness", "250"]);
    assert_eq!(code, 1);
}

#[test]
fn test_run_with_file_and_no_ticks() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, "[]").unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["run", "--file", file.to_str().unwrap(), "--ticks", "0"],
    );
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("No more meetings today"));
    assert!(stdout.contains("light: green"));
    assert!(stdout.contains("light: off"));
}

#[test]
fn test_run_without_endpoint_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["run", "--ticks", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not configured"));
}

#[test]
fn test_run_without_endpoint_fails_before_first_tick() {
    let home = tempfile::tempdir().unwrap();
    // The built binary directly, so compile time does not count against the deadline.
    let mut child = Command::new(env!("CARGO_BIN_EXE_meetlight-cli"))
        .arg("run")
        .env("HOME", home.path())
        .env_remove("MEETLIGHT_ENV")
        .env_remove("MEETLIGHT_TOKEN")
        .env("RUST_LOG", "warn")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI");

    // Default tick is 60s; an unconfigured endpoint must fail well before that.
    let deadline = Instant::now() + Duration::from_secs(20);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("run kept going without an endpoint");
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "refresh.bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key: refresh.bogus"));
}

#[test]
fn test_check_does_not_write_config() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, EVENTS).unwrap();

    let (_, stderr, code) = run_cli(
        home.path(),
        &["check", "--file", file.to_str().unwrap(), "--now", "1710504000"],
    );
    assert_eq!(code, 0, "check failed: {stderr}");
    assert!(!home.path().join(".config").join("meetlight").join("config.toml").exists());
}

#[test]
fn test_check_rejects_invalid_overrides() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, EVENTS).unwrap();
    let file = file.to_str().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["check", "--file", file, "--max-rows", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("proximity.max_rows"));

    let (_, stderr, code) = run_cli(
        home.path(),
        &["check", "--file", file, "--soon-threshold=-1"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("proximity.soon_threshold_secs"));
}

#[test]
fn test_check_reports_corrupt_config() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("meetlight");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "refresh = 12 = 3").unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, EVENTS).unwrap();

    let (_, _, code) = run_cli(home.path(), &["check", "--file", file.to_str().unwrap()]);
    assert_eq!(code, 1);
}

#[test]
fn test_check_accepts_extreme_now() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("events.json");
    std::fs::write(&file, EVENTS).unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["check", "--file", file.to_str().unwrap(), "--now=-9223372036854775808"],
    );
    assert_eq!(code, 0, "check failed: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["alert"], "none");
    assert_eq!(report["rows"].as_array().unwrap().len(), 2);
}
