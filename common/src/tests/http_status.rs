use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification used to categorize remote API failures.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range bounds (e.g. 500 counted as a client error).
#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(429).is_auth_failure());
}

#[test]
fn given_status_code_when_displayed_then_prints_number() {
    assert_eq!(HttpStatusCode::from(404).to_string(), "404");
}
