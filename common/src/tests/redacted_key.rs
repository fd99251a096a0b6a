use crate::{RedactError, RedactedApiKey};

/// **VALUE**: Verifies that the credential never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: The coordinator logs request context; a stray `{:?}` must not
/// write the user's API key to the log file.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual redacting impl.
#[test]
fn given_api_key_when_formatted_then_value_is_redacted() {
    // GIVEN: A key
    let key = RedactedApiKey::new(String::from("AIza-secret-value"));

    // WHEN: Formatting it both ways
    let debug = format!("{:?}", key);
    let display = format!("{}", key);

    // THEN: Neither contains the secret
    assert!(!debug.contains("secret"));
    assert!(!display.contains("secret"));
    assert!(debug.contains("len=17"));
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch the key being silently embedded in a serialized reply.
#[test]
fn given_api_key_when_serialized_then_fails() {
    let key = RedactedApiKey::new(String::from("abc"));

    let result = serde_json::to_string(&key);

    let error = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(error.contains("RedactedApiKey cannot be serialized"));
    assert!(!error.contains("abc"));
}

/// **VALUE**: Verifies the refusal error names the secret type without its value.
#[test]
fn given_refused_error_when_read_then_message_names_type_only() {
    let error = RedactError::refused("RedactedApiKey");

    assert_eq!(
        error.message(),
        "RedactedApiKey cannot be serialized; read it with as_str()"
    );
    assert!(error.to_string().starts_with("Secret Serialization Error:"));
}

/// **VALUE**: Verifies input normalization used by the popup's save action.
///
/// **BUG THIS CATCHES**: Would catch whitespace-only input being stored as a key instead
/// of clearing the stored one.
#[test]
fn given_raw_input_when_building_key_then_trims_and_rejects_blank() {
    assert_eq!(
        RedactedApiKey::from_input("  key-123 \n").map(|k| k.as_str().to_string()),
        Some(String::from("key-123"))
    );
    assert!(RedactedApiKey::from_input("   ").is_none());
    assert!(RedactedApiKey::from_input("").is_none());
}
