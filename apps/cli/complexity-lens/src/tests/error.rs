// Unit tests for error module
// Tests serialization and the user-facing message accessor

use crate::error::CliError;

/// **VALUE**: Tests that errors can be serialized with their variant tag.
///
/// **WHY THIS MATTERS**: Errors are logged and may be emitted as JSON by wrappers around
/// the CLI. If serialization breaks, callers receive opaque errors.
///
/// **BUG THIS CATCHES**: Would catch if someone removes the `#[derive(Serialize)]`
/// or adds a non-serializable field to a variant.
#[test]
fn given_cli_error_when_serialized_then_tagged_with_variant() {
    // GIVEN: A CliError
    let err = CliError::analysis("Analysis only works on LeetCode problem or submission pages.");

    // WHEN: Serializing to JSON
    let json = serde_json::to_value(&err).expect("Error should be serializable");

    // THEN: Variant tag and message present
    assert_eq!(json["type"], "Analysis");
    assert_eq!(
        json["data"]["message"],
        "Analysis only works on LeetCode problem or submission pages."
    );
    assert!(json["data"]["location"]["line"].is_u64());
}

/// **VALUE**: Verifies `message()` omits the location while Display keeps it.
///
/// **BUG THIS CATCHES**: Would catch source paths leaking into terminal output.
#[test]
fn given_cli_error_when_message_then_no_location() {
    let err = CliError::credential("quota exceeded");

    assert_eq!(err.message(), "quota exceeded");
    assert!(err.to_string().starts_with("Credential Error: quota exceeded ["));
}

#[test]
fn given_constructor_when_called_then_location_points_at_caller() {
    let err = CliError::cli("boom");

    match err {
        CliError::Cli { location, .. } => assert_eq!(location.file_name(), "error.rs"),
        other => panic!("unexpected variant: {other:?}"),
    }
}
