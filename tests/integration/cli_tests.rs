use assert_cmd::Command;
use predicates::prelude::*;

/// Binary run from an empty directory so no stray config file is picked up.
#[allow(deprecated)]
fn overrun(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("overrun").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir).arg("--version").assert().success();
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_demo_tracking_text() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("[4, 2, 3]"))
        .stdout(predicate::str::contains("head=none tail=none wrapped=false"));
}

#[test]
fn test_demo_minimal_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = overrun(&dir)
        .args(["demo", "--policy", "minimal", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let steps: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = steps.as_array().unwrap();
    assert_eq!(steps.len(), 17);
    assert_eq!(steps[0]["state"]["policy"], "minimal");
}

#[test]
fn test_run_script_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .args(["run", "-n", "3"])
        .write_stdin("put 1..=4\ndrain\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("-> [2, 3, 4]"));
}

#[test]
fn test_run_script_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("ops.txt");
    std::fs::write(&script, "put 1; put 2; put 3; put 4; get\n").unwrap();
    overrun(&dir)
        .args(["run", "--policy", "minimal"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> 4"));
}

#[test]
fn test_config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("overrun.toml"),
        "[buffer]\npolicy = \"minimal\"\ncapacity = 5\n",
    )
    .unwrap();
    overrun(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("policy = \"minimal\""))
        .stdout(predicate::str::contains("capacity = 5"));
}

#[test]
fn test_zero_capacity_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .args(["demo", "-n", "0"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid capacity"));
}

#[test]
fn test_bad_script_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .arg("run")
        .write_stdin("put 1\npop\n")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_oversized_capacity_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .args(["demo", "-n", "18446744073709551615"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("at most"));
}

#[test]
fn test_missing_config_file_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .args(["--config", "missing.toml", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_verbose_logs_to_stderr_even_with_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    overrun(&dir)
        .env("RUST_LOG", "off")
        .args(["-v", "demo", "-n", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("applied"));
}

#[test]
fn test_run_streams_large_script() {
    let dir = tempfile::tempdir().unwrap();
    let output = overrun(&dir)
        .args(["run", "-n", "2"])
        .write_stdin("put 1..=20000
drain
")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 20001);
    assert!(stdout.lines().last().unwrap().contains("-> [19999, 20000]"));
}

#[test]
fn test_bad_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("overrun.toml"), "[buffer]\ncapacity = 0\n").unwrap();
    overrun(&dir).arg("demo").assert().code(2);
}
