//! Custom assertion macros and utilities
//!
//! Helpers for checking the error body shape and redirects.

use axum::http::{header::LOCATION, StatusCode};
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert the `{error, detail, status}` body and status code of a failure
pub fn assert_error(response: &TestResponse, status: StatusCode, kind: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert_eq!(body["error"], kind);
    assert_eq!(body["status"], status.as_u16());
    assert!(body["detail"].is_string());
}

/// Assert a temporary redirect and return its `Location`
pub fn assert_redirect(response: &TestResponse) -> String {
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| panic!("redirect without Location header"))
}
