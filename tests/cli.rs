use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use qrfixtures::{FIXTURES, QrDecoder};

fn qrfixtures(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qrfixtures"));
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join("xdg"))
        .env_remove("QRFIXTURES_OUTPUT_DIR")
        .env_remove("QRFIXTURES_LOG_FILE");
    cmd
}

#[test]
fn no_arguments_writes_five_fixtures_into_mock_qrcodes() {
    let temp = TempDir::new().unwrap();

    qrfixtures(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mock QR codes generated in the 'mock_qrcodes' directory"));

    let out = temp.path().join("mock_qrcodes");
    assert_eq!(fs::read_dir(&out).unwrap().count(), FIXTURES.len());

    let decoder = QrDecoder::new();
    for fixture in FIXTURES.iter() {
        let decoded = decoder.decode_file(&out.join(fixture.file_name)).unwrap();
        assert_eq!(decoded.as_str(), Some(fixture.payload));
    }
}

#[test]
fn output_dir_on_a_regular_file_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, b"").unwrap();

    qrfixtures(temp.path())
        .arg("--output-dir")
        .arg(&blocker)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to generate fixtures"));
}

#[test]
fn json_stdout_is_parseable_and_logs_stay_off_stdout() {
    let temp = TempDir::new().unwrap();

    let assert = qrfixtures(temp.path())
        .args(["--json", "--verify", "--output-dir", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"));

    let stdout = &assert.get_output().stdout;
    let emissions: Value = serde_json::from_slice(stdout).expect("stdout is a single JSON document");
    let emissions = emissions.as_array().expect("array of emissions");
    assert_eq!(emissions.len(), FIXTURES.len());

    for (emission, fixture) in emissions.iter().zip(FIXTURES.iter()) {
        assert_eq!(emission["payload"], fixture.payload);
        assert_eq!(emission["verified"], true);
        assert!(
            emission["path"]
                .as_str()
                .is_some_and(|p| p.ends_with(fixture.file_name))
        );
    }
}

#[test]
fn piped_logs_carry_no_ansi_escapes() {
    let temp = TempDir::new().unwrap();

    qrfixtures(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}[").not());
}
