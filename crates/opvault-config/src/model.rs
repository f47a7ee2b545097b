// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at load time instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level opvault configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpvaultConfig {
    /// Provider identity and logging.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 1Password Connect server settings.
    #[serde(default)]
    pub connect: ConnectConfig,
}

/// Provider identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider type name; resource type names are `<type_name>_<resource>`.
    #[serde(default = "default_type_name")]
    pub type_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            type_name: default_type_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_type_name() -> String {
    "onepassword".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 1Password Connect server configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectConfig {
    /// Base URL of the Connect server, e.g. `http://localhost:8080`.
    #[serde(default)]
    pub url: Option<String>,

    /// Connect access token. Also read from `OP_CONNECT_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for ConnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    30
}
