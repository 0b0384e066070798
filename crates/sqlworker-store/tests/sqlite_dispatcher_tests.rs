// Dispatcher driven end to end over a real in-memory SQLite engine

use serde_json::json;
use sqlworker_core::{Dispatcher, Response, WorkerConfig};
use sqlworker_store::SqliteEngineLoader;
use std::io::Write;

fn dispatcher(config: WorkerConfig) -> Dispatcher<SqliteEngineLoader> {
    Dispatcher::new(SqliteEngineLoader::from_config(&config), config)
}

#[tokio::test]
async fn test_full_session_scenario() {
    let mut d = dispatcher(WorkerConfig::default());

    let responses = vec![
        d.handle_message(json!({ "command": "open", "options": {} })).await,
        d.handle_message(json!({ "command": "execute", "sql": "CREATE TABLE t(x)" }))
            .await,
        d.handle_message(json!({ "command": "execute", "sql": "INVALID SQL" }))
            .await,
        d.handle_message(json!({ "command": "execute", "sql": "INSERT INTO t VALUES (1)" }))
            .await,
        d.handle_message(json!({ "command": "close" })).await,
        d.handle_message(json!({ "command": "execute", "sql": "SELECT 1" }))
            .await,
    ];

    assert_eq!(responses[0], Response::ok());
    assert_eq!(responses[1], Response::ok());
    let invalid = responses[2].error_message().unwrap();
    assert!(invalid.contains("syntax error"), "got {:?}", invalid);
    assert_eq!(responses[3], Response::ok());
    assert_eq!(responses[4], Response::ok());
    assert_eq!(responses[5].error_message(), Some("Database not open"));
}

#[tokio::test]
async fn test_reopen_starts_with_empty_database() {
    let mut d = dispatcher(WorkerConfig::default());

    d.handle_message(json!({ "command": "open" })).await;
    d.handle_message(json!({ "command": "execute", "sql": "CREATE TABLE t(x)" }))
        .await;
    d.handle_message(json!({ "command": "open" })).await;

    let resp = d
        .handle_message(json!({ "command": "execute", "sql": "INSERT INTO t VALUES (1)" }))
        .await;
    assert_eq!(resp.error_message(), Some("no such table: t"));
}

#[tokio::test]
async fn test_multi_statement_execute() {
    let mut d = dispatcher(WorkerConfig::default());
    d.handle_message(json!({ "command": "open" })).await;

    let resp = d
        .handle_message(json!({
            "command": "execute",
            "sql": "CREATE TABLE t(x); INSERT INTO t VALUES (1); SELECT * FROM t;"
        }))
        .await;

    assert_eq!(resp, Response::ok());
}

#[tokio::test]
async fn test_required_asset_missing_fails_open() {
    let mut d = dispatcher(WorkerConfig {
        require_asset: true,
        ..WorkerConfig::default()
    });

    let resp = d
        .handle_message(json!({
            "command": "open",
            "options": { "sqlite3WasmPath": "/no/such/sqlite3.wasm" }
        }))
        .await;

    let message = resp.error_message().unwrap();
    assert!(message.starts_with("asset unreachable: /no/such/sqlite3.wasm"));
    assert!(!d.is_open());
}

#[tokio::test]
async fn test_required_asset_empty_file_is_malformed() {
    let asset = tempfile::NamedTempFile::new().unwrap();
    let path = asset.path().to_string_lossy().to_string();
    let mut d = dispatcher(WorkerConfig {
        require_asset: true,
        ..WorkerConfig::default()
    });

    let resp = d
        .handle_message(json!({ "command": "open", "options": { "sqlite3WasmPath": path } }))
        .await;

    assert_eq!(
        resp.error_message(),
        Some(format!("asset malformed: {}", path).as_str())
    );
}

#[tokio::test]
async fn test_required_asset_present_opens() {
    let mut asset = tempfile::NamedTempFile::new().unwrap();
    asset.write_all(b"\0asm\x01\0\0\0").unwrap();
    let config = WorkerConfig {
        builtin_asset_path: asset.path().to_string_lossy().to_string(),
        require_asset: true,
        ..WorkerConfig::default()
    };
    let mut d = dispatcher(config);

    let resp = d.handle_message(json!({ "command": "open" })).await;

    assert_eq!(resp, Response::ok());
    assert!(d.is_open());
}

#[tokio::test]
async fn test_shutdown_releases_database() {
    let mut d = dispatcher(WorkerConfig::default());
    d.handle_message(json!({ "command": "open" })).await;

    d.shutdown();

    assert!(!d.is_open());
}
