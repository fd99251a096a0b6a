use crate::GEMINI_ENDPOINT;
use crate::config::{AppConfig, UiConfig};
use crate::error::config::ConfigError;

use std::time::Duration;

use tempfile::TempDir;

/// **VALUE**: Verifies a missing file yields the documented defaults.
///
/// **WHY THIS MATTERS**: First run has no config file; analysis must still work with
/// the stock endpoint and generation settings.
///
/// **BUG THIS CATCHES**: Would catch a missing file being reported as an error, or a
/// default drifting from the request contract (temperature 0.2, 1000 tokens).
#[test]
fn given_no_config_file_when_load_then_defaults() {
    // GIVEN: An empty config dir
    let dir = TempDir::new().expect("temp dir");

    // WHEN: Loading
    let config = AppConfig::load(dir.path()).expect("load should succeed");

    // THEN: Defaults
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.api.endpoint, GEMINI_ENDPOINT);
    assert!((config.api.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.api.max_output_tokens, 1000);
    assert_eq!(config.api.request_timeout(), Duration::from_secs(60));
    assert_eq!(config.ui.success_clear_delay(), Duration::from_millis(4000));
    assert_eq!(config.ui.key_status_clear_delay(), Duration::from_millis(3000));
}

#[test]
fn given_saved_config_when_load_then_same_values() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = AppConfig::default();
    config.api.request_timeout_secs = 15;
    config.ui.success_clear_ms = 250;

    config.save(dir.path()).expect("save should succeed");
    let loaded = AppConfig::load(dir.path()).expect("load should succeed");

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

/// **VALUE**: Verifies sections missing from the file fall back to defaults.
///
/// **BUG THIS CATCHES**: Would catch `#[serde(default)]` being dropped from a field, which
/// turns an older config file into a parse error.
#[test]
fn given_partial_config_when_load_then_missing_fields_defaulted() {
    // GIVEN: Only a timeout override
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "api": { "request_timeout_secs": 5 } }"#,
    )
    .expect("write config");

    // WHEN: Loading
    let config = AppConfig::load(dir.path()).expect("load should succeed");

    // THEN: Override applied, everything else default
    assert_eq!(config.api.request_timeout_secs, 5);
    assert_eq!(config.api.max_output_tokens, 1000);
    assert_eq!(config.ui, UiConfig::default());
}

#[test]
fn given_corrupted_config_when_load_then_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("config.json"), "{ not json").expect("write config");

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **BUG THIS CATCHES**: Would catch an unreadable config file silently falling back
/// to defaults.
#[test]
fn given_unreadable_config_when_load_then_read_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("config.json")).expect("occupy config path");

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

/// **VALUE**: Verifies out-of-range values are rejected on load and on save.
///
/// **BUG THIS CATCHES**: Would catch an invalid endpoint or temperature reaching the
/// request builder and failing only at analysis time.
#[test]
fn given_invalid_values_when_validate_then_validation_error() {
    let mut bad_temperature = AppConfig::default();
    bad_temperature.api.temperature = 1.5;

    let mut bad_endpoint = AppConfig::default();
    bad_endpoint.api.endpoint = String::from("ftp://example.com");

    let mut bad_tokens = AppConfig::default();
    bad_tokens.api.max_output_tokens = 0;

    let mut bad_timeout = AppConfig::default();
    bad_timeout.api.request_timeout_secs = 0;

    for config in [bad_temperature, bad_endpoint, bad_tokens, bad_timeout] {
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    let dir = TempDir::new().expect("temp dir");
    let mut unsaveable = AppConfig::default();
    unsaveable.version = 0;
    assert!(unsaveable.save(dir.path()).is_err());
    assert!(!dir.path().join("config.json").exists());
}
