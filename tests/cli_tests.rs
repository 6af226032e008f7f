// tests/cli_tests.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn svclog() -> Command {
    let mut cmd = Command::cargo_bin("svclog").unwrap();
    cmd.env_remove("APPVEYOR").env_remove("NO_COLOR");
    cmd
}

#[test]
fn test_information_message() {
    svclog()
        .args(["--color", "never", "Build {0} succeeded", "MyApp"])
        .assert()
        .success()
        .stdout("Build MyApp succeeded\n\n")
        .stderr("");
}

#[test]
fn test_error_goes_to_stderr() {
    svclog()
        .args(["--color", "never", "-l", "error"])
        .args(["Build failed: {0}", "missing file"])
        .assert()
        .success()
        .stdout("\n")
        .stderr("Build failed: missing file\n");
}

#[test]
fn test_quiet_hides_information() {
    svclog()
        .args(["--color", "never", "-v", "quiet", "hidden {0}", "x"])
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn test_message_verbosity_override() {
    // an error written at diagnostic verbosity is filtered by the default threshold
    svclog()
        .args(["--color", "never", "-l", "error", "--message-verbosity", "diag"])
        .arg("not shown")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn test_malformed_template_fails() {
    svclog()
        .args(["--color", "never", "Copied {0} of {1", "1", "2"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("Copied 1 of "))
        .stderr(predicate::str::contains("svclog: error"))
        .stderr(predicate::str::contains("position 14"));
}

#[test]
fn test_missing_argument_fails() {
    svclog()
        .args(["--color", "never", "{0} and {1}", "one"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Argument missing"));
}

#[test]
fn test_typed_arguments() {
    svclog()
        .args(["--color", "never", "--typed", "{0:.2} MB, {1:x}", "3.14159", "255"])
        .assert()
        .success()
        .stdout("3.14 MB, ff\n\n");

    // without --typed the value is a string, and precision truncates it
    svclog()
        .args(["--color", "never", "{0:.2} MB", "3.14159"])
        .assert()
        .success()
        .stdout("3. MB\n\n");
}

#[test]
fn test_escaped_braces() {
    svclog()
        .args(["--color", "never", "{0} items, {{count}} total", "5"])
        .assert()
        .success()
        .stdout("5 items, {count} total\n\n");
}

#[test]
fn test_color_always_emits_sequences() {
    svclog()
        .args(["--color", "always", "Build {0} succeeded", "MyApp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["))
        .stdout(predicate::str::contains("MyApp"))
        .stdout(predicate::str::contains("\x1b[0m"));
}

#[test]
fn test_bypass_writes_plain_text() {
    svclog()
        .args(["--color", "always", "--bypass", r"^##vso\["])
        .args(["##vso[task.setvariable variable=x]{0}", "1"])
        .assert()
        .success()
        .stdout("##vso[task.setvariable variable=x]1\n\n");
}

#[test]
fn test_invalid_bypass_pattern() {
    svclog()
        .args(["--bypass", "(", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid bypass pattern"));
}

#[test]
fn test_config_file_sets_verbosity() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "verbosity: minimal\ncolor: never").unwrap();

    svclog()
        .arg("--config")
        .arg(config.path())
        .args(["-l", "information", "hidden"])
        .assert()
        .success()
        .stdout("");

    // the flag wins over the file
    svclog()
        .arg("--config")
        .arg(config.path())
        .args(["-v", "normal", "shown"])
        .assert()
        .success()
        .stdout("shown\n\n");
}

#[test]
fn test_missing_config_file() {
    svclog()
        .args(["--config", "/nonexistent/svclog.yaml", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_appveyor_reporter_failure_is_reported() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "color: never\nappveyor:\n  program: svclog-test-no-such-program"
    )
    .unwrap();

    svclog()
        .env("APPVEYOR", "True")
        .arg("--config")
        .arg(config.path())
        .args(["Build {0} succeeded", "MyApp"])
        .assert()
        .code(1)
        .stdout("Build MyApp succeeded\n\n")
        .stderr(predicate::str::contains("svclog-test-no-such-program"));
}

#[test]
fn test_no_ci_skips_appveyor() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "color: never\nappveyor:\n  program: svclog-test-no-such-program"
    )
    .unwrap();

    svclog()
        .env("APPVEYOR", "True")
        .arg("--config")
        .arg(config.path())
        .args(["--no-ci", "Build {0} succeeded", "MyApp"])
        .assert()
        .success()
        .stdout("Build MyApp succeeded\n\n");
}
