//! Response Encoding Tests
//!
//! Tests verify:
//! - Wire text for each outcome kind
//! - Row-major flattening of query results
//! - Column value rendering
//! - Parsing responses on the client side

use rusqlite::types::Value;
use sqlframe::protocol::{render_value, Response, Status};
use sqlframe::storage::Outcome;

// =============================================================================
// Outcome Encoding Tests
// =============================================================================

#[test]
fn test_executed_outcome() {
    let response: Response = Outcome::Executed.into();
    assert_eq!(response.encode(), "SUCCESS|()");
}

#[test]
fn test_failed_outcome() {
    let response: Response = Outcome::Failed("no such table: nope".to_string()).into();
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.encode(), "ERROR|no such table: nope");
}

#[test]
fn test_failed_outcome_separator_not_escaped() {
    let response: Response = Outcome::Failed("near \"|\": syntax error".to_string()).into();
    assert_eq!(response.encode(), "ERROR|near \"|\": syntax error");
}

#[test]
fn test_acknowledged_outcome() {
    let response: Response = Outcome::Acknowledged("Report printed to server console".into()).into();
    assert_eq!(response.encode(), "SUCCESS|Report printed to server console");
}

#[test]
fn test_empty_rows() {
    let response: Response = Outcome::Rows(vec![]).into();
    assert_eq!(response.encode(), "SUCCESS|");
    assert!(response.values().is_empty());
}

#[test]
fn test_rows_flattened_row_major() {
    let rows = vec![
        vec![Value::Text("alice".into()), Value::Integer(1)],
        vec![Value::Text("bob".into()), Value::Integer(2)],
        vec![Value::Text("carol".into()), Value::Integer(3)],
    ];
    let response: Response = Outcome::Rows(rows).into();

    assert_eq!(response.encode(), "SUCCESS|alice|1|bob|2|carol|3");
    assert_eq!(response.values().len(), 3 * 2);
}

#[test]
fn test_separator_inside_value_is_not_escaped() {
    let rows = vec![vec![Value::Text("a|b".into()), Value::Text("c".into())]];
    let response = Response::rows(&rows);

    assert_eq!(response.encode(), "SUCCESS|a|b|c");
    // Known ambiguity: the client sees three values
    assert_eq!(response.values(), vec!["a", "b", "c"]);
}

// =============================================================================
// Value Rendering Tests
// =============================================================================

#[test]
fn test_render_values() {
    assert_eq!(render_value(&Value::Null), "None");
    assert_eq!(render_value(&Value::Integer(-42)), "-42");
    assert_eq!(render_value(&Value::Real(2.5)), "2.5");
    assert_eq!(render_value(&Value::Real(3.0)), "3.0");
    assert_eq!(render_value(&Value::Text("hello world".into())), "hello world");
    assert_eq!(render_value(&Value::Blob(b"raw".to_vec())), "raw");
}

#[test]
fn test_render_reals_switch_to_exponent_form() {
    assert_eq!(render_value(&Value::Real(1e20)), "1e+20");
    assert_eq!(render_value(&Value::Real(1e16)), "1e+16");
    assert_eq!(render_value(&Value::Real(1.2345e16)), "1.2345e+16");
    assert_eq!(render_value(&Value::Real(-2.5e17)), "-2.5e+17");
    assert_eq!(render_value(&Value::Real(1.5e-5)), "1.5e-05");
    assert_eq!(render_value(&Value::Real(1e-100)), "1e-100");
}

#[test]
fn test_render_reals_plain_form_bounds() {
    assert_eq!(render_value(&Value::Real(1e15)), "1000000000000000.0");
    assert_eq!(render_value(&Value::Real(0.0001)), "0.0001");
    assert_eq!(render_value(&Value::Real(0.0)), "0.0");
    assert_eq!(render_value(&Value::Real(-7.0)), "-7.0");
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_from_wire_success() {
    let response = Response::from_wire("SUCCESS|alice|pw").unwrap();
    assert_eq!(response, Response::success("alice|pw"));
    assert_eq!(response.values(), vec!["alice", "pw"]);
}

#[test]
fn test_from_wire_error() {
    let response = Response::from_wire("ERROR|UNIQUE constraint failed: users.username").unwrap();
    assert!(!response.is_success());
    assert_eq!(response.payload, "UNIQUE constraint failed: users.username");
}

#[test]
fn test_from_wire_rejects_garbage() {
    assert!(Response::from_wire("no separator").is_err());
    assert!(Response::from_wire("MAYBE|x").is_err());
}
