//! CLI integration tests for line-check

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const TOKEN_VAR: &str = "LINE_CHANNEL_ACCESS_TOKEN";

fn setup_test_env(api_base: &str, content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let content_path = temp_dir.path().join("content.json");
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&content_path, content).unwrap();
    fs::write(
        &config_path,
        format!(
            "[content]\npath = \"{}\"\n\n[line]\napi_base = \"{}\"\n",
            content_path.to_string_lossy().replace('\\', "\\\\"),
            api_base
        ),
    )
    .unwrap();

    (temp_dir, config_path.to_string_lossy().to_string())
}

fn line_check(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("line-check").unwrap();
    cmd.env("LINECAST_CONFIG", config_path)
        .env_remove(TOKEN_VAR)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_all_checks_pass() {
    let (_dir, config) = setup_test_env(
        "http://127.0.0.1:9",
        r#"[{"text": "A", "date": "2024-03-01"}, {"text": "B"}]"#,
    );

    line_check(&config)
        .env(TOKEN_VAR, "check-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 post(s) found"))
        .stdout(predicate::str::contains("PASS: Configuration"))
        .stdout(predicate::str::contains("PASS: Content file"))
        .stdout(predicate::str::contains("LINE API").not());
}

#[test]
fn test_missing_token_fails_configuration() {
    let (_dir, config) = setup_test_env("http://127.0.0.1:9", r#"[{"text": "A"}]"#);

    line_check(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAIL: Configuration"))
        .stdout(predicate::str::contains(TOKEN_VAR))
        .stdout(predicate::str::contains("PASS: Content file"));
}

#[test]
fn test_invalid_content_reports_items() {
    let (_dir, config) = setup_test_env(
        "http://127.0.0.1:9",
        r#"[{"text": "A"}, {"image_url": "https://example.com/b.png"}, {"text": "C", "date": "2024-3-1"}]"#,
    );

    line_check(&config)
        .env(TOKEN_VAR, "check-token")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAIL: Content file"))
        .stdout(predicate::str::contains("item 2: missing 'text' field"))
        .stdout(predicate::str::contains("item 3: invalid date"));
}

#[test]
fn test_invalid_content_keeps_warnings() {
    let (_dir, config) = setup_test_env(
        "http://127.0.0.1:9",
        r#"[{"text": "A", "date": "2024-03-01"}, {"text": "B", "date": "2024-03-01"}, {"date": "2024-03-02"}]"#,
    );

    line_check(&config)
        .env(TOKEN_VAR, "check-token")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAIL: Content file"))
        .stdout(predicate::str::contains("item 3: missing 'text' field"))
        .stdout(predicate::str::contains("warning: item 2:"));
}

#[test]
fn test_live_check_sends_test_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/bot/message/broadcast")
            .header("authorization", "Bearer check-token")
            .json_body(json!({
                "messages": [{
                    "type": "text",
                    "text": "[TEST] This is a test message from the automatic posting system."
                }]
            }));
        then.status(200).json_body(json!({}));
    });
    let (_dir, config) = setup_test_env(&server.base_url(), r#"[{"text": "A"}]"#);

    line_check(&config)
        .env(TOKEN_VAR, "check-token")
        .arg("--live")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS: LINE API"));

    mock.assert_calls(1);
}

#[test]
fn test_live_check_rejected_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v2/bot/message/broadcast");
        then.status(401)
            .json_body(json!({"message": "Authentication failed"}));
    });
    let (_dir, config) = setup_test_env(&server.base_url(), r#"[{"text": "A"}]"#);

    line_check(&config)
        .env(TOKEN_VAR, "expired")
        .args(["--live", "--format", "json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(r#""passed": false"#))
        .stdout(predicate::str::contains("HTTP 401"));

    mock.assert_calls(1);
}
