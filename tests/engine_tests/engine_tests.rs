//! Tests for Engine
//!
//! These tests verify:
//! - Engine open (config, schema)
//! - Frame routing to report / query / execute
//! - Wire text of each response kind
//! - Original frame text reaches storage untouched

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use sqlframe::config::Config;
use sqlframe::engine::Engine;
use sqlframe::protocol::Command;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn setup_temp_engine() -> (TempDir, Engine, SharedSink) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .database_path(temp_dir.path().join("engine.db"))
        .build();
    let sink = SharedSink::default();
    let engine = Engine::open(config).unwrap().with_report_sink(sink.clone());
    (temp_dir, engine, sink)
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_engine_open_creates_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data").join("engine.db");

    let engine = Engine::open_path(&path).unwrap();

    assert!(path.exists());
    assert_eq!(engine.config().database_path, path);
    assert_eq!(engine.gateway().path(), path.as_path());
}

#[test]
fn test_engine_open_fails_when_store_unwritable() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the store file should be
    let path = temp_dir.path().join("is_a_dir");
    std::fs::create_dir(&path).unwrap();

    assert!(Engine::open_path(&path).is_err());
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_execute_frame() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    let response =
        engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");
    assert_eq!(response.encode(), "SUCCESS|()");
}

#[test]
fn test_execute_error_frame() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");
    let response =
        engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");

    assert_eq!(
        response.encode(),
        "ERROR|UNIQUE constraint failed: users.username"
    );
}

#[test]
fn test_query_frame_any_case_and_padding() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();
    engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");
    engine.handle_frame("INSERT INTO users (username, password) VALUES ('bob', 'pw2')");

    let response =
        engine.handle_frame("   select username, password from users order by username  \n");

    assert_eq!(response.encode(), "SUCCESS|alice|pw|bob|pw2");
}

#[test]
fn test_query_frame_empty_result() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    let response = engine.handle_frame("SELECT * FROM users");
    assert_eq!(response.encode(), "SUCCESS|");
}

#[test]
fn test_query_null_renders_as_none() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();
    engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");
    engine.handle_frame(
        "INSERT INTO login_history (username, login_time) VALUES ('alice', '2024-01-01 10:00:00')",
    );

    let response = engine.handle_frame("SELECT username, login_time, logout_time FROM login_history");
    assert_eq!(
        response.encode(),
        "SUCCESS|alice|2024-01-01 10:00:00|None"
    );
}

#[test]
fn test_report_frame() {
    let (_temp_dir, engine, sink) = setup_temp_engine();
    engine.handle_frame("INSERT INTO users (username, password) VALUES ('alice', 'pw')");

    let response = engine.handle_frame(" report ");

    assert_eq!(response.encode(), "SUCCESS|Report printed to server console");

    let printed = String::from_utf8(sink.0.lock().clone()).unwrap();
    assert!(printed.contains("- alice (Registered: "));
    assert!(printed.contains("(No history found)"));
    assert!(printed.contains("(No files uploaded)"));
    // Report body never reaches the client
    assert!(!response.payload.contains("alice"));
}

#[test]
fn test_empty_and_comment_frames_succeed() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    assert_eq!(engine.handle_frame("").encode(), "SUCCESS|()");
    assert_eq!(engine.handle_frame("  \t\n").encode(), "SUCCESS|()");
    assert_eq!(engine.handle_frame("-- nothing here").encode(), "SUCCESS|()");
}

#[test]
fn test_multi_statement_frame_is_error() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    let response = engine.handle_frame(
        "INSERT INTO users (username, password) VALUES ('a', 'p'); DELETE FROM users",
    );
    assert_eq!(
        response.encode(),
        "ERROR|You can only execute one statement at a time."
    );

    let response = engine.handle_frame("select 1; select 2");
    assert_eq!(
        response.encode(),
        "ERROR|You can only execute one statement at a time."
    );
    assert_eq!(engine.handle_frame("SELECT COUNT(*) FROM users").encode(), "SUCCESS|0");
}

#[test]
fn test_execute_command_directly() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    let response = engine.execute(Command::Execute {
        statement: "CREATE TABLE extra (x INTEGER)",
    });
    assert!(response.is_success());

    let response = engine.execute(Command::Query {
        statement: "SELECT COUNT(*) FROM extra",
    });
    assert_eq!(response.encode(), "SUCCESS|0");
}

#[test]
fn test_select_like_text_in_execute_is_not_trimmed() {
    let (_temp_dir, engine, _sink) = setup_temp_engine();

    // Leading whitespace is forwarded as-is; SQLite ignores it
    let response = engine.handle_frame(
        "\n  INSERT INTO users (username, password) VALUES ('  padded  ', 'pw')",
    );
    assert!(response.is_success());

    let response = engine.handle_frame("SELECT username FROM users");
    assert_eq!(response.encode(), "SUCCESS|  padded  ");
}
