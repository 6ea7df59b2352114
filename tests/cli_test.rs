/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{AndroidFileBuilder, FixtureDir, WinPhoneFileBuilder};
use predicates::prelude::*;

#[test]
fn test_cli_info_winphone_file() {
    let fixture = FixtureDir::new();
    let input = fixture.write(
        "backup.msg",
        &WinPhoneFileBuilder::new()
            .with_comment(" exported by phone ")
            .with_incoming("+1", "a", 1)
            .with_incoming("+2", "b", 2)
            .build(),
    );

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("contacts+message backup"))
        .stdout(predicate::str::contains("Messages: 2"))
        .stdout(predicate::str::contains("exported by phone"));
}

#[test]
fn test_cli_info_unknown_file() {
    let fixture = FixtureDir::new();
    let input = fixture.write("notes.txt", "nothing resembling a backup");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: unknown"));
}

#[test]
fn test_cli_convert_to_android() {
    let fixture = FixtureDir::new();
    let input = fixture.write(
        "backup.msg",
        &WinPhoneFileBuilder::new()
            .with_incoming("+1", "hello", 131_329_631_293_736_951)
            .with_outgoing(&["+2", "+3"], "group", 131_329_488_070_946_809)
            .build(),
    );
    let output = fixture.path().join("sms.xml");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--to", "android"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully converted 3 messages"));

    assert!(output.exists());
}

#[test]
fn test_cli_convert_with_custom_comment() {
    let fixture = FixtureDir::new();
    let input =
        fixture.write("sms.xml", &AndroidFileBuilder::new().with_row("+1", 1000, 1, "x").build());
    let output = fixture.path().join("backup.msg");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--to", "winphone", "--comment", "my own stamp"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("<!--my own stamp-->"));
}

#[test]
fn test_cli_convert_unknown_input_fails() {
    let fixture = FixtureDir::new();
    let input = fixture.write("garbage.bin", "not a backup");
    let output = fixture.path().join("out.xml");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--to", "android"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized input format"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert SMS backups between mobile archive formats"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sms-convert"));
    cmd.arg("explode").assert().failure();
}
