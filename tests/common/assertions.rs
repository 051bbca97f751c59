//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response redirects back to the page with 303 See Other
pub fn assert_redirect_home(response: &TestResponse) {
    assert_status(response, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/"));
}

/// Assert JSON error response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert a CSS background is a linear gradient at the given angle
pub fn assert_gradient(css: &serde_json::Value, angle: &str) {
    let css = css.as_str().expect("Expected a CSS string");
    assert!(
        css.starts_with(&format!("linear-gradient({angle}deg, ")),
        "Expected {angle}deg gradient, got {css}"
    );
}
