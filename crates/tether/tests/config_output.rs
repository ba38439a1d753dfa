//! Integration tests for `tether config` and config fallback warnings

use std::process::Command;

use tempfile::TempDir;

fn run_config(home: &std::path::Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tether"))
        .arg("config")
        .env("HOME", home)
        .current_dir(home)
        .output()
        .expect("Failed to execute 'tether config'")
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let output = run_config(dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: toml::Value = toml::from_str(&stdout).expect("stdout should be valid TOML");
    assert_eq!(value["history"]["recent_limit"].as_integer(), Some(10));
    assert_eq!(value["sync"]["ready_delay_ms"].as_integer(), Some(0));
    assert_eq!(value["sync"]["log_events"].as_bool(), Some(true));
}

#[test]
fn test_config_project_override() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".tether")).unwrap();
    std::fs::write(
        dir.path().join(".tether/config.toml"),
        "[history]\nrecent_limit = 3\n",
    )
    .unwrap();

    let output = run_config(dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: toml::Value = toml::from_str(&stdout).unwrap();
    assert_eq!(value["history"]["recent_limit"].as_integer(), Some(3));
}

#[test]
fn test_invalid_config_warns_and_uses_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".tether")).unwrap();
    std::fs::write(dir.path().join(".tether/config.toml"), "[history\nbroken").unwrap();

    let output = run_config(dir.path());
    assert!(output.status.success(), "invalid config should fall back to defaults");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: Could not load config"));

    let value: toml::Value = toml::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(value["history"]["recent_limit"].as_integer(), Some(10));
}
