// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault resource and its lifecycle handlers.
//!
//! Every handler decodes its plan or state, makes at most one remote call
//! through the configured [`VaultClient`], and writes the vault the remote
//! returned back into state. Failures become a single error diagnostic.

use std::sync::Arc;

use async_trait::async_trait;
use opvault_core::framework::{
    AttrValue, ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, Diagnostics, ImportStateRequest, ImportStateResponse, MetadataRequest,
    MetadataResponse, ReadRequest, ReadResponse, Resource, ResourceWithImportState, Schema,
    UpdateRequest, UpdateResponse, cancellable,
};
use opvault_core::{CancellationToken, OpError, Vault, VaultClient};
use tracing::{debug, trace, warn};

use crate::classify::{self, ErrorClass};
use crate::id;
use crate::model::VaultResourceModel;
use crate::schema::{self, ATTR_DESCRIPTION, ATTR_ID, ATTR_NAME, ATTR_UUID};

pub const CREATE_ERROR: &str = "1Password Vault create error";
pub const READ_ERROR: &str = "1Password Vault read error";
pub const UPDATE_ERROR: &str = "1Password Vault update error";
pub const DELETE_ERROR: &str = "1Password Vault delete error";
pub const CONFIGURE_TYPE_ERROR: &str = "Unexpected Resource Configure Type";
pub const UNCONFIGURED_ERROR: &str = "Unconfigured 1Password client";

/// Manages a 1Password vault.
#[derive(Default)]
pub struct VaultResource {
    client: Option<Arc<dyn VaultClient>>,
}

/// Factory handed to the provider's resource registry.
pub fn new_vault_resource() -> Box<dyn ResourceWithImportState> {
    Box::new(VaultResource::new())
}

impl VaultResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<dyn VaultClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self, diags: &mut Diagnostics) -> Option<&Arc<dyn VaultClient>> {
        if self.client.is_none() {
            diags.add_error(
                UNCONFIGURED_ERROR,
                "The vault resource was used before the provider configured a client. \
                 Please report this issue to the provider developers.",
            );
        }
        self.client.as_ref()
    }
}

fn log_failure(operation: &str, uuid: &str, err: &OpError) {
    match classify::classify(err) {
        ErrorClass::Unsupported => {
            warn!(operation, vault_id = uuid, error = %err, "backend refused vault operation")
        }
        class => debug!(operation, vault_id = uuid, class = %class, error = %err, "vault operation failed"),
    }
}

#[async_trait]
impl Resource for VaultResource {
    fn metadata(&self, req: &MetadataRequest, resp: &mut MetadataResponse) {
        resp.type_name = format!("{}_vault", req.provider_type_name);
    }

    fn schema(&self) -> Schema {
        schema::vault_schema()
    }

    fn configure(&mut self, req: &ConfigureRequest, resp: &mut ConfigureResponse) {
        // Provider not configured yet; the orchestrator will call again.
        let Some(data) = req.provider_data.as_ref() else {
            return;
        };

        match data.downcast_ref::<Arc<dyn VaultClient>>() {
            Some(client) => {
                debug!(backend = client.name(), "vault resource configured");
                self.client = Some(Arc::clone(client));
            }
            None => resp.diagnostics.add_error(
                CONFIGURE_TYPE_ERROR,
                format!(
                    "Expected Arc<dyn VaultClient>, got: {}. Please report this issue to the provider developers.",
                    data.type_name()
                ),
            ),
        }
    }

    async fn create(
        &self,
        ctx: &CancellationToken,
        req: &CreateRequest,
        resp: &mut CreateResponse,
    ) {
        let Some(plan) = req.plan.get::<VaultResourceModel>(&mut resp.diagnostics) else {
            return;
        };
        if resp.diagnostics.has_error() {
            return;
        }
        let Some(client) = self.client(&mut resp.diagnostics) else {
            return;
        };

        let request = Vault::new(plan.name.value_str(), plan.description.value_str());
        let created = match cancellable(ctx, client.create_vault(&request)).await {
            Ok(vault) => vault,
            Err(err) => {
                log_failure("create", "", &err);
                resp.diagnostics.add_error(
                    CREATE_ERROR,
                    format!("Error creating 1Password vault, got error: {err}"),
                );
                return;
            }
        };

        resp.state.set(&VaultResourceModel::from_vault(&created));
        trace!(vault_id = %created.id, "created a vault resource");
    }

    async fn read(&self, ctx: &CancellationToken, req: &ReadRequest, resp: &mut ReadResponse) {
        let Some(state) = req.state.get::<VaultResourceModel>(&mut resp.diagnostics) else {
            return;
        };
        if resp.diagnostics.has_error() {
            return;
        }
        let Some(client) = self.client(&mut resp.diagnostics) else {
            return;
        };

        let uuid = id::decompose(state.id.value_str());
        match cancellable(ctx, client.get_vault(&uuid)).await {
            Ok(vault) => resp.state.set(&VaultResourceModel::from_vault(&vault)),
            Err(err) if classify::is_not_found(&err) => {
                debug!(vault_id = %uuid, "vault no longer exists; removing from state");
                resp.state.remove_resource();
            }
            Err(err) => {
                log_failure("read", &uuid, &err);
                resp.diagnostics.add_error(
                    READ_ERROR,
                    format!("Could not get vault '{uuid}', got error: {err}"),
                );
            }
        }
    }

    async fn update(
        &self,
        ctx: &CancellationToken,
        req: &UpdateRequest,
        resp: &mut UpdateResponse,
    ) {
        let Some(plan) = req.plan.get::<VaultResourceModel>(&mut resp.diagnostics) else {
            return;
        };
        if resp.diagnostics.has_error() {
            return;
        }
        let Some(client) = self.client(&mut resp.diagnostics) else {
            return;
        };

        let uuid = plan.uuid.value_str();
        let request = Vault::new(plan.name.value_str(), plan.description.value_str()).with_id(uuid);
        match cancellable(ctx, client.update_vault(&request)).await {
            Ok(updated) => {
                resp.state.set(&VaultResourceModel::from_vault(&updated));
                trace!(vault_id = %updated.id, "updated a vault resource");
            }
            Err(err) => {
                log_failure("update", uuid, &err);
                resp.diagnostics.add_error(
                    UPDATE_ERROR,
                    format!("Could not update vault '{uuid}', got error: {err}"),
                );
            }
        }
    }

    async fn delete(
        &self,
        ctx: &CancellationToken,
        req: &DeleteRequest,
        resp: &mut DeleteResponse,
    ) {
        let Some(state) = req.state.get::<VaultResourceModel>(&mut resp.diagnostics) else {
            return;
        };
        if resp.diagnostics.has_error() {
            return;
        }
        let Some(client) = self.client(&mut resp.diagnostics) else {
            return;
        };

        let uuid = state.uuid.value_str();
        if let Err(err) = cancellable(ctx, client.delete_vault(uuid)).await {
            log_failure("delete", uuid, &err);
            resp.diagnostics.add_error(
                DELETE_ERROR,
                format!("Could not delete vault '{uuid}', got error: {err}"),
            );
            return;
        }
        trace!(vault_id = %uuid, "deleted a vault resource");
    }
}

impl ResourceWithImportState for VaultResource {
    fn import_state(&self, req: &ImportStateRequest, resp: &mut ImportStateResponse) {
        let uuid = req.id.as_str();
        if uuid.is_empty() {
            resp.diagnostics.add_error(
                "Invalid import ID",
                "Expected the UUID of an existing vault, got an empty string.",
            );
            return;
        }

        resp.state.set_attribute(ATTR_ID, id::compose(uuid));
        resp.state.set_attribute(ATTR_UUID, uuid);
        // Populated by the Read that follows every import.
        resp.state.set_attribute(ATTR_NAME, AttrValue::Unknown);
        resp.state.set_attribute(ATTR_DESCRIPTION, AttrValue::Unknown);
    }
}
