//! Integration tests for lanekit CLI

use httpmock::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn lanekit() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lanekit"));
    // Keep the developer's config and environment out of the tests
    command
        .env_remove("RUST_LOG")
        .env_remove("LANEKIT_OUTPUT")
        .env_remove("LANEKIT_COLOR")
        .env_remove("LANEKIT_BUGLY_ENDPOINT")
        .env_remove("LANEKIT_PGYER_ENDPOINT")
        .env_remove("FL_BEARY_CHAT_ROBOT_KEY")
        .env_remove("FL_BEARY_CHAT_MESSAGE_TITLE")
        .env_remove("FL_BEARY_CHAT_MESSAGE_TEXT")
        .env_remove("FL_PGYER_USER_KEY")
        .env_remove("FL_PGYER_API_KEY")
        .env_remove("FL_PGYER_APP_PATH");
    command
}

fn empty_config() -> NamedTempFile {
    NamedTempFile::new().expect("Failed to create config file")
}

#[test]
fn test_cli_version() {
    let output = lanekit()
        .arg("--version")
        .output()
        .expect("Failed to execute lanekit");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lanekit"));
}

#[test]
fn test_cli_help() {
    let output = lanekit()
        .arg("--help")
        .output()
        .expect("Failed to execute lanekit");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CI pipeline actions for mobile release lanes"));
    assert!(stdout.contains("actions"));
    assert!(stdout.contains("describe"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("lane"));
}

#[test]
fn test_cli_invalid_command() {
    let output = lanekit()
        .arg("invalid-command")
        .output()
        .expect("Failed to execute lanekit");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_actions_json() {
    let config = empty_config();
    let output = lanekit()
        .args(["--json", "--config"])
        .arg(config.path())
        .arg("actions")
        .output()
        .expect("Failed to execute lanekit");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|action| action["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["beary_chat", "bugly", "pgyer"]);
}

#[test]
fn test_describe_lists_options() {
    let config = empty_config();
    let output = lanekit()
        .args(["--color", "never", "--config"])
        .arg(config.path())
        .args(["describe", "pgyer"])
        .output()
        .expect("Failed to execute lanekit");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FL_PGYER_USER_KEY"));
    assert!(stdout.contains("install_password"));
    assert!(stdout.contains("PGYER_INSTALL_QRCODE_URL"));
}

#[test]
fn test_run_missing_parameter_fails() {
    let config = empty_config();
    let output = lanekit()
        .arg("--config")
        .arg(config.path())
        .args(["run", "beary_chat", "-p", "message_title=Build"])
        .output()
        .expect("Failed to execute lanekit");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required field: robot_url"));
    assert!(!stderr.contains("Application error"), "{stderr}");
}

#[test]
fn test_run_unknown_action_fails() {
    let config = empty_config();
    let output = lanekit()
        .args(["--json", "--config"])
        .arg(config.path())
        .args(["run", "slack"])
        .output()
        .expect("Failed to execute lanekit");

    assert!(!output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("error should be JSON");
    assert_eq!(value["error"]["code"], "config.unknown_action");
}

#[test]
fn test_run_pgyer_prints_qr_code_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/apiv1/app/upload");
        then.status(200)
            .body(r#"{"code":0,"data":{"appQRCodeURL":"https://qr/1","appKey":"k1"}}"#);
    });

    let mut config = empty_config();
    writeln!(config, "[endpoints]\npgyer = \"{}\"", server.base_url()).unwrap();
    let mut artifact = NamedTempFile::new().unwrap();
    write!(artifact, "ipa-bytes").unwrap();

    let output = lanekit()
        .args(["--color", "never", "--config"])
        .arg(config.path())
        .args(["run", "pgyer", "-p", "user_key=u", "-p", "api_key=a", "-p"])
        .arg(format!("app_path={}", artifact.path().display()))
        .output()
        .expect("Failed to execute lanekit");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    mock.assert();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("https://qr/1"));
    assert!(stdout.contains("PGYER_INSTALL_APP_KEY=k1"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Upload to Pgyer successfully!"));
}

#[test]
fn test_lane_file_not_found() {
    let config = empty_config();
    let output = lanekit()
        .arg("--config")
        .arg(config.path())
        .args(["lane", "/nonexistent/lane.toml"])
        .output()
        .expect("Failed to execute lanekit");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/lane.toml"));
}
