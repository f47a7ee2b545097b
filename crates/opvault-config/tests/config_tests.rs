// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the opvault configuration system.

use opvault_config::diagnostic::ConfigError;
use opvault_config::model::OpvaultConfig;
use opvault_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with every known field deserializes.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[provider]
type_name = "op"
log_level = "debug"

[connect]
url = "https://connect.example.com"
token = "connect-token"
timeout_secs = 10
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should load");
    assert_eq!(config.provider.type_name, "op");
    assert_eq!(config.provider.log_level, "debug");
    assert_eq!(
        config.connect.url.as_deref(),
        Some("https://connect.example.com")
    );
    assert_eq!(config.connect.token.as_deref(), Some("connect-token"));
    assert_eq!(config.connect.timeout_secs, 10);
}

/// Empty input falls back to compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.provider.type_name, "onepassword");
    assert_eq!(config.provider.log_level, "info");
    assert!(config.connect.url.is_none());
    assert!(config.connect.token.is_none());
    assert_eq!(config.connect.timeout_secs, 30);
}

/// A misspelled key becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn typo_in_connect_section_suggests_fix() {
    let toml = r#"
[connect]
tokn = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "tokn");
            assert_eq!(suggestion.as_deref(), Some("token"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let err = load_config_from_str("[vaults]\nname = \"x\"\n").expect_err("should fail");
    let rendered = err.to_string();
    assert!(
        rendered.contains("unknown field") || rendered.contains("vaults"),
        "got: {rendered}"
    );
}

/// Wrong value type is reported as InvalidType with the key path.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[connect]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject string timeout");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "connect.timeout_secs"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

/// Semantic validation runs after a successful parse.
#[test]
fn url_without_token_fails_validation() {
    let toml = r#"
[connect]
url = "https://connect.example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("token is required with url");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Defaults survive a serialize/extract cycle through figment.
#[test]
fn serialized_defaults_are_sensible() {
    let config = OpvaultConfig::default();
    let json = serde_json::to_value(&config).expect("config should serialize");
    assert_eq!(json["provider"]["type_name"], "onepassword");
    assert_eq!(json["connect"]["timeout_secs"], 30);
    assert!(json["connect"]["token"].is_null());
}
