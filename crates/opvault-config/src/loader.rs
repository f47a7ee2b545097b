// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./opvault.toml` > `~/.config/opvault/opvault.toml` >
//! `/etc/opvault/opvault.toml`, with the standard `OP_CONNECT_HOST` /
//! `OP_CONNECT_TOKEN` variables on top and `OPVAULT_*` above those.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::OpvaultConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/opvault/opvault.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "opvault.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("opvault/opvault.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/opvault/opvault.toml`
/// 3. `~/.config/opvault/opvault.toml`
/// 4. `./opvault.toml`
/// 5. `OP_CONNECT_HOST` / `OP_CONNECT_TOKEN`
/// 6. `OPVAULT_*` environment variables
pub fn load_config() -> Result<OpvaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<OpvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OpvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Env layering matches [`load_config`]: `OPVAULT_*` overrides
/// `OP_CONNECT_*`, which overrides the file.
pub fn load_config_from_path(path: &Path) -> Result<OpvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OpvaultConfig::default()))
        .merge(Toml::file(path))
        .merge(onepassword_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(OpvaultConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(onepassword_env_provider())
        .merge(env_provider())
}

/// `OPVAULT_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `OPVAULT_CONNECT_TIMEOUT_SECS` is `connect.timeout_secs`.
fn env_provider() -> Env {
    Env::prefixed("OPVAULT_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("provider_", "provider.", 1)
            .replacen("connect_", "connect.", 1)
            .into()
    })
}

/// The variables every 1Password tool understands.
fn onepassword_env_provider() -> Env {
    Env::raw()
        .only(&["OP_CONNECT_HOST", "OP_CONNECT_TOKEN"])
        .map(|key| {
            if key.as_str().eq_ignore_ascii_case("OP_CONNECT_HOST") {
                "connect.url".into()
            } else {
                "connect.token".into()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opvault_env_maps_underscored_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPVAULT_CONNECT_TIMEOUT_SECS", "7");
            jail.set_env("OPVAULT_PROVIDER_TYPE_NAME", "op");
            let config: OpvaultConfig = Figment::new()
                .merge(Serialized::defaults(OpvaultConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.connect.timeout_secs, 7);
            assert_eq!(config.provider.type_name, "op");
            Ok(())
        });
    }

    #[test]
    fn standard_connect_variables_are_honored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OP_CONNECT_HOST", "http://connect.internal:8080");
            jail.set_env("OP_CONNECT_TOKEN", "tok");
            let config: OpvaultConfig = Figment::new()
                .merge(Serialized::defaults(OpvaultConfig::default()))
                .merge(onepassword_env_provider())
                .extract()?;
            assert_eq!(
                config.connect.url.as_deref(),
                Some("http://connect.internal:8080")
            );
            assert_eq!(config.connect.token.as_deref(), Some("tok"));
            Ok(())
        });
    }

    #[test]
    fn opvault_prefix_wins_over_standard_variables() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OP_CONNECT_HOST", "http://from-op:8080");
            jail.set_env("OPVAULT_CONNECT_URL", "http://from-opvault:8080");
            let config: OpvaultConfig = Figment::new()
                .merge(Serialized::defaults(OpvaultConfig::default()))
                .merge(onepassword_env_provider())
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.connect.url.as_deref(), Some("http://from-opvault:8080"));
            Ok(())
        });
    }

    #[test]
    fn path_loading_applies_opvault_over_standard_variables() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[connect]
url = "http://file:8080"
token = "file-token"
"#,
            )?;
            jail.set_env("OP_CONNECT_HOST", "http://from-op:8080");
            jail.set_env("OP_CONNECT_TOKEN", "op-token");
            jail.set_env("OPVAULT_CONNECT_URL", "http://from-opvault:8080");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.connect.url.as_deref(), Some("http://from-opvault:8080"));
            assert_eq!(config.connect.token.as_deref(), Some("op-token"));
            Ok(())
        });
    }

    #[test]
    fn hierarchy_applies_opvault_over_standard_variables() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_PATH, "[connect]\ntimeout_secs = 5\n")?;
            jail.set_env("OP_CONNECT_HOST", "http://from-op:8080");
            jail.set_env("OP_CONNECT_TOKEN", "op-token");
            jail.set_env("OPVAULT_CONNECT_TOKEN", "opvault-token");
            let config = load_config()?;
            assert_eq!(config.connect.url.as_deref(), Some("http://from-op:8080"));
            assert_eq!(config.connect.token.as_deref(), Some("opvault-token"));
            assert_eq!(config.connect.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn path_loading_reads_file_then_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[connect]
url = "http://file:8080"
token = "file-token"
"#,
            )?;
            jail.set_env("OPVAULT_CONNECT_TOKEN", "env-token");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.connect.url.as_deref(), Some("http://file:8080"));
            assert_eq!(config.connect.token.as_deref(), Some("env-token"));
            Ok(())
        });
    }
}
