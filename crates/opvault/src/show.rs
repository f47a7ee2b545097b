// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `opvault show`: adopt a vault by UUID and print the refreshed state.
//!
//! Runs the same Import-then-Read sequence the orchestrator performs, so the
//! output is exactly what would be persisted after `terraform import`.

use std::sync::Arc;

use opvault_config::OpvaultConfig;
use opvault_connect::ConnectClient;
use opvault_core::framework::{
    ConfigureRequest, ConfigureResponse, Diagnostics, ImportStateRequest, ImportStateResponse,
    ProviderData, ReadRequest, ReadResponse, Resource, ResourceWithImportState,
};
use opvault_core::{CancellationToken, OpError, VaultClient};
use opvault_resource::{id, new_vault_resource};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error(transparent)]
    Client(#[from] OpError),

    #[error("{}", render(.0))]
    Diagnostics(Diagnostics),

    #[error("vault '{0}' not found")]
    NotFound(String),
}

fn render(diags: &Diagnostics) -> String {
    diags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accept either a bare UUID or the composite `vaults/<uuid>` form.
pub fn import_key(input: &str) -> String {
    let input = input.trim();
    if input.contains('/') {
        id::decompose(input)
    } else {
        input.to_string()
    }
}

/// Build the Connect client from configuration and run [`show_with_client`].
pub async fn run_show(
    config: &OpvaultConfig,
    input: &str,
    ctx: &CancellationToken,
) -> Result<serde_json::Value, ShowError> {
    let client = ConnectClient::from_config(&config.connect)?;
    info!(backend = client.name(), "1Password client initialized");
    show_with_client(Arc::new(client), input, ctx).await
}

pub async fn show_with_client(
    client: Arc<dyn VaultClient>,
    input: &str,
    ctx: &CancellationToken,
) -> Result<serde_json::Value, ShowError> {
    let key = import_key(input);
    let mut resource = new_vault_resource();

    let mut configured = ConfigureResponse::default();
    resource.configure(
        &ConfigureRequest {
            provider_data: Some(Arc::new(ProviderData::new(client))),
        },
        &mut configured,
    );
    if configured.diagnostics.has_error() {
        return Err(ShowError::Diagnostics(configured.diagnostics));
    }

    let mut imported = ImportStateResponse::default();
    resource.import_state(&ImportStateRequest { id: key.clone() }, &mut imported);
    if imported.diagnostics.has_error() {
        return Err(ShowError::Diagnostics(imported.diagnostics));
    }

    let req = ReadRequest {
        state: imported.state,
    };
    let mut read = ReadResponse::for_request(&req);
    resource.read(ctx, &req, &mut read).await;
    if read.diagnostics.has_error() {
        return Err(ShowError::Diagnostics(read.diagnostics));
    }
    if read.state.is_removed() {
        return Err(ShowError::NotFound(key));
    }

    debug!(vault_id = %key, "vault state refreshed");
    Ok(read.state.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opvault_config::model::ConnectConfig;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> OpvaultConfig {
        OpvaultConfig {
            connect: ConnectConfig {
                url: Some(server.uri()),
                token: Some("test-token".into()),
                ..ConnectConfig::default()
            },
            ..OpvaultConfig::default()
        }
    }

    #[test]
    fn import_key_accepts_both_forms() {
        assert_eq!(import_key("AAA"), "AAA");
        assert_eq!(import_key("vaults/AAA"), "AAA");
        assert_eq!(import_key(" vaults/AAA \n"), "AAA");
        assert_eq!(import_key("a/b/c"), "");
    }

    #[tokio::test]
    async fn show_prints_refreshed_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/vaults/EEE"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "EEE",
                "name": "Existing",
                "description": "adopted",
                "attributeVersion": 1,
                "contentVersion": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = run_show(&config_for(&server), "vaults/EEE", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            state,
            serde_json::json!({
                "description": "adopted",
                "id": "vaults/EEE",
                "name": "Existing",
                "uuid": "EEE"
            })
        );
    }

    #[tokio::test]
    async fn show_missing_vault_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/vaults/CCC"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "status": 404,
                "message": "vault not found"
            })))
            .mount(&server)
            .await;

        let err = run_show(&config_for(&server), "CCC", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ShowError::NotFound(ref id) if id == "CCC"));
    }

    #[tokio::test]
    async fn show_surfaces_read_diagnostic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/vaults/AAA"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": 401,
                "message": "Invalid token signature"
            })))
            .mount(&server)
            .await;

        let err = run_show(&config_for(&server), "AAA", &CancellationToken::new())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1Password Vault read error"), "{message}");
        assert!(message.contains("Invalid token signature"), "{message}");
    }

    #[tokio::test]
    async fn show_requires_connect_url() {
        let err = run_show(&OpvaultConfig::default(), "AAA", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ShowError::Client(OpError::Config(_))));
    }

    #[tokio::test]
    async fn empty_import_key_is_rejected_before_any_request() {
        let server = MockServer::start().await;
        let err = run_show(&config_for(&server), "vaults/a/b", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ShowError::Diagnostics(_)));
    }
}
