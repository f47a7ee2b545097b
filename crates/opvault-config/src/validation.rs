// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use tracing::warn;

use crate::diagnostic::ConfigError;
use crate::model::OpvaultConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &OpvaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let type_name = config.provider.type_name.as_str();
    if type_name.is_empty() {
        errors.push(ConfigError::Validation {
            message: "provider.type_name must not be empty".to_string(),
        });
    } else if !type_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "provider.type_name `{type_name}` may only contain lowercase letters, digits and underscores"
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.provider.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "provider.log_level `{}` must be one of: {}",
                config.provider.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(url) = config.connect.url.as_deref() {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("connect.url `{url}` must start with http:// or https://"),
            });
        } else if url.starts_with("http://") && !is_loopback_url(url) {
            warn!(url, "connect.url uses plain http; the token is sent unencrypted");
        }

        let has_token = config
            .connect
            .token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_token {
            errors.push(ConfigError::Validation {
                message: "connect.token is required when connect.url is set (or export OP_CONNECT_TOKEN)"
                    .to_string(),
            });
        }
    }

    if config.connect.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "connect.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_loopback_url(url: &str) -> bool {
    let rest = url.trim_start_matches("http://");
    rest.starts_with("localhost") || rest.starts_with("127.") || rest.starts_with("[::1]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectConfig;
    use tracing_test::traced_test;

    fn connect(url: &str, token: Option<&str>) -> OpvaultConfig {
        OpvaultConfig {
            connect: ConnectConfig {
                url: Some(url.to_string()),
                token: token.map(str::to_string),
                ..ConnectConfig::default()
            },
            ..OpvaultConfig::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&OpvaultConfig::default()).is_ok());
    }

    #[test]
    fn url_without_token_is_rejected() {
        let errors = validate_config(&connect("https://connect.example.com", None)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("connect.token"));
    }

    #[test]
    fn url_scheme_is_checked() {
        let errors = validate_config(&connect("ftp://connect", Some("t"))).unwrap_err();
        assert!(errors[0].to_string().contains("http:// or https://"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = connect("connect.local", Some(" "));
        config.provider.type_name = "One-Password".into();
        config.provider.log_level = "loud".into();
        config.connect.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[traced_test]
    #[test]
    fn plain_http_to_remote_host_warns() {
        validate_config(&connect("http://connect.example.com", Some("t"))).unwrap();
        assert!(logs_contain("token is sent unencrypted"));
    }

    #[traced_test]
    #[test]
    fn plain_http_to_localhost_is_quiet() {
        validate_config(&connect("http://localhost:8080", Some("t"))).unwrap();
        assert!(!logs_contain("token is sent unencrypted"));
    }
}
