// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the 1Password Connect server API.
//!
//! Connect exposes read-only vault endpoints. Create, update and delete are
//! refused locally with [`OpError::Unsupported`] and never reach the network.

use std::time::Duration;

use async_trait::async_trait;
use opvault_config::model::ConnectConfig;
use opvault_core::{OpError, Vault, VaultClient};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::types::{ErrorResponse, VaultResponse};

/// Client for a self-hosted 1Password Connect server.
///
/// Holds a pooled `reqwest::Client`; cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct ConnectClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl ConnectClient {
    /// Creates a client for the Connect server at `base_url`.
    pub fn new(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self, OpError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| OpError::Config(format!("invalid Connect URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(OpError::Config(format!(
                "Connect URL `{base_url}` cannot be used as a base URL"
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(format!("opvault/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| OpError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Creates a client from the `[connect]` configuration section.
    pub fn from_config(config: &ConnectConfig) -> Result<Self, OpError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| OpError::Config("connect.url is not set".to_string()))?;
        let token = config
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| OpError::Config("connect.token is not set".to_string()))?;

        let client = Self::new(
            url,
            SecretString::from(token),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(url, "1Password Connect client initialized");
        Ok(client)
    }

    /// `{base}/v1/vaults/{uuid}`, with `uuid` percent-encoded as one segment.
    fn vault_url(&self, uuid: &str) -> Result<Url, OpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OpError::Internal("Connect base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "vaults", uuid]);
        Ok(url)
    }
}

#[async_trait]
impl VaultClient for ConnectClient {
    fn name(&self) -> &str {
        "1password-connect"
    }

    async fn create_vault(&self, _vault: &Vault) -> Result<Vault, OpError> {
        Err(OpError::unsupported("creating vaults"))
    }

    async fn get_vault(&self, uuid: &str) -> Result<Vault, OpError> {
        let url = self.vault_url(uuid)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|e| OpError::Transport {
                message: if e.is_timeout() {
                    "request to 1Password Connect timed out".to_string()
                } else {
                    format!("HTTP request failed: {e}")
                },
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, vault_id = uuid, "Connect vault response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OpError::vault_not_found(uuid));
        }

        let body = response.text().await.map_err(|e| OpError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => err.message,
                Err(_) if body.is_empty() => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                Err(_) => body,
            };
            return Err(OpError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let vault: VaultResponse = serde_json::from_str(&body).map_err(|e| OpError::Transport {
            message: format!("failed to parse vault response: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(
            vault_id = %vault.id,
            attribute_version = vault.attribute_version,
            content_version = vault.content_version,
            "vault fetched"
        );
        Ok(vault.into())
    }

    async fn update_vault(&self, _vault: &Vault) -> Result<Vault, OpError> {
        Err(OpError::unsupported("updating vaults"))
    }

    async fn delete_vault(&self, _uuid: &str) -> Result<(), OpError> {
        Err(OpError::unsupported("deleting vaults"))
    }
}
