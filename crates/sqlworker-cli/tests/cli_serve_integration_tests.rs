//! CLI integration tests
//!
//! These tests run the `sqlworker` binary with piped stdin and check the
//! JSON lines it writes to stdout.

use serde_json::{json, Value};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_serve(args: &[&str], input: impl AsRef<[u8]>) -> (Vec<Value>, std::process::ExitStatus) {
    let cli_bin = env!("CARGO_BIN_EXE_sqlworker");
    let temp_dir = TempDir::new().unwrap();

    let mut child = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .arg("serve")
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_ref())
        .unwrap();
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let responses = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (responses, output.status)
}

#[test]
fn test_cli_serve_full_session() {
    let input = [
        json!({ "command": "open", "options": {} }),
        json!({ "command": "execute", "sql": "CREATE TABLE t(x)" }),
        json!({ "command": "execute", "sql": "INVALID SQL" }),
        json!({ "command": "execute", "sql": "INSERT INTO t VALUES (1)" }),
        json!({ "command": "close" }),
        json!({ "command": "execute", "sql": "SELECT 1" }),
    ]
    .iter()
    .map(|m| format!("{}\n", m))
    .collect::<String>();

    let (responses, status) = run_serve(&[], &input);

    assert!(status.success());
    assert_eq!(responses.len(), 6);
    assert_eq!(responses[0], json!({ "result": {} }));
    assert_eq!(responses[1], json!({ "result": {} }));
    assert!(responses[2]["error"]
        .as_str()
        .unwrap()
        .contains("syntax error"));
    assert_eq!(responses[3], json!({ "result": {} }));
    assert_eq!(responses[4], json!({ "result": {} }));
    assert_eq!(responses[5], json!({ "error": "Database not open" }));
}

#[test]
fn test_cli_serve_answers_every_line_despite_invalid_utf8() {
    let input: &[u8] = b"{\"command\":\"open\"}\n\xff\xfe\n{\"command\":\"close\"}\n";

    let (responses, status) = run_serve(&[], input);

    assert!(status.success());
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0], json!({ "result": {} }));
    assert!(responses[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid message: "));
    assert_eq!(responses[2], json!({ "result": {} }));
}

#[test]
fn test_cli_serve_unknown_command() {
    let (responses, status) = run_serve(&[], "{\"command\":\"vacuum\"}\n");

    assert!(status.success());
    assert_eq!(responses, vec![json!({ "error": "Unknown command: vacuum" })]);
}

#[test]
fn test_cli_serve_require_asset_flag() {
    let (responses, _) = run_serve(
        &["--require-asset", "--builtin-asset-path", "/no/such/sqlite3.wasm"],
        "{\"command\":\"open\"}\n",
    );

    let error = responses[0]["error"].as_str().unwrap();
    assert!(error.starts_with("asset unreachable: /no/such/sqlite3.wasm"));
}

#[test]
fn test_cli_serve_rejects_bad_config_file() {
    let cli_bin = env!("CARGO_BIN_EXE_sqlworker");
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("worker.toml");
    std::fs::write(&config_path, "no_such_key = 1\n").unwrap();

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(["serve", "--config", config_path.to_str().unwrap()])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load worker configuration"));
}

#[test]
fn test_cli_resolve_prints_location() {
    let cli_bin = env!("CARGO_BIN_EXE_sqlworker");

    let custom = Command::new(cli_bin)
        .args(["resolve", "--wasm-path", "/opt/sqlite3.wasm"])
        .env_remove("SQLWORKER_BUILTIN_ASSET_PATH")
        .output()
        .expect("Failed to execute CLI");
    let passthrough = Command::new(cli_bin)
        .args(["resolve", "other.bin", "--wasm-path", "/opt/sqlite3.wasm"])
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(String::from_utf8_lossy(&custom.stdout).trim(), "/opt/sqlite3.wasm");
    assert_eq!(String::from_utf8_lossy(&passthrough.stdout).trim(), "other.bin");
}
