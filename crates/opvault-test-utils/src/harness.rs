// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator stand-in for end-to-end lifecycle tests.
//!
//! `ResourceHarness` owns a configured resource and the single state row it
//! manages. `apply()` plans against the schema and dispatches to Create or
//! Update, `refresh()` runs Read and drops the row when the resource asks to
//! be removed, and `import()` runs ImportState followed by Read.

use std::sync::Arc;

use opvault_core::framework::{
    ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, Diagnostics, ImportStateRequest, ImportStateResponse, MetadataRequest,
    MetadataResponse, ProviderData, ReadRequest, ReadResponse, Resource, ResourceWithImportState,
    State, UpdateRequest, UpdateResponse,
};
use opvault_core::{CancellationToken, VaultClient};
use tracing::debug;

use crate::mock_client::MockVaultClient;

/// What `plan()` decided to do with a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Update,
    NoOp,
}

/// Builder for creating harnesses with configurable options.
pub struct ResourceHarnessBuilder {
    client: Arc<MockVaultClient>,
    provider_type_name: String,
}

impl ResourceHarnessBuilder {
    fn new() -> Self {
        Self {
            client: Arc::new(MockVaultClient::new()),
            provider_type_name: "onepassword".to_string(),
        }
    }

    /// Use a pre-seeded backend.
    pub fn with_client(mut self, client: MockVaultClient) -> Self {
        self.client = Arc::new(client);
        self
    }

    pub fn with_provider_type_name(mut self, name: impl Into<String>) -> Self {
        self.provider_type_name = name.into();
        self
    }

    /// Run Metadata and Configure on `resource`, handing it the mock as
    /// `Arc<dyn VaultClient>` provider data.
    pub fn build(
        self,
        mut resource: Box<dyn ResourceWithImportState>,
    ) -> Result<ResourceHarness, Diagnostics> {
        let mut metadata = MetadataResponse::default();
        resource.metadata(
            &MetadataRequest {
                provider_type_name: self.provider_type_name,
            },
            &mut metadata,
        );

        let client: Arc<dyn VaultClient> = self.client.clone();
        let mut configured = ConfigureResponse::default();
        resource.configure(
            &ConfigureRequest {
                provider_data: Some(Arc::new(ProviderData::new(client))),
            },
            &mut configured,
        );
        if configured.diagnostics.has_error() {
            return Err(configured.diagnostics);
        }

        Ok(ResourceHarness {
            resource,
            client: self.client,
            type_name: metadata.type_name,
            state: None,
            ctx: CancellationToken::new(),
        })
    }
}

/// A configured resource plus the state row the orchestrator would persist.
pub struct ResourceHarness {
    resource: Box<dyn ResourceWithImportState>,
    client: Arc<MockVaultClient>,
    type_name: String,
    state: Option<State>,
    ctx: CancellationToken,
}

impl ResourceHarness {
    pub fn builder() -> ResourceHarnessBuilder {
        ResourceHarnessBuilder::new()
    }

    /// The backend shared with the resource, for seeding and assertions.
    pub fn client(&self) -> &Arc<MockVaultClient> {
        &self.client
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The persisted state row, if the resource exists.
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// A handle on the token passed to every handler, for cancelling a call
    /// in flight.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.ctx.clone()
    }

    /// Compute the planned state for `config` and the action it implies.
    pub fn plan(&self, config: &State) -> Result<(PlanAction, State), Diagnostics> {
        let mut diags = Diagnostics::new();
        let planned = self
            .resource
            .schema()
            .plan(config, self.state.as_ref(), &mut diags);
        if diags.has_error() {
            return Err(diags);
        }

        let action = match &self.state {
            None => PlanAction::Create,
            Some(prior) if *prior == planned => PlanAction::NoOp,
            Some(_) => PlanAction::Update,
        };
        Ok((action, planned))
    }

    /// Plan `config` and apply it, persisting the returned state.
    pub async fn apply(&mut self, config: &State) -> Result<PlanAction, Diagnostics> {
        let (action, planned) = self.plan(config)?;
        debug!(type_name = %self.type_name, ?action, "applying plan");

        match action {
            PlanAction::NoOp => {}
            PlanAction::Create => {
                let req = CreateRequest { plan: planned };
                let mut resp = CreateResponse::default();
                self.resource.create(&self.ctx, &req, &mut resp).await;
                if resp.diagnostics.has_error() {
                    return Err(resp.diagnostics);
                }
                self.state = Some(resp.state);
            }
            PlanAction::Update => {
                let req = UpdateRequest {
                    plan: planned,
                    prior_state: self.state.clone().unwrap_or_default(),
                };
                let mut resp = UpdateResponse::default();
                self.resource.update(&self.ctx, &req, &mut resp).await;
                if resp.diagnostics.has_error() {
                    return Err(resp.diagnostics);
                }
                self.state = Some(resp.state);
            }
        }
        Ok(action)
    }

    /// Run Read against the current row. A failed Read leaves the row as
    /// it was.
    pub async fn refresh(&mut self) -> Result<(), Diagnostics> {
        let Some(state) = self.state.clone() else {
            return Ok(());
        };

        let req = ReadRequest { state };
        let mut resp = ReadResponse::for_request(&req);
        self.resource.read(&self.ctx, &req, &mut resp).await;
        if resp.diagnostics.has_error() {
            return Err(resp.diagnostics);
        }

        self.state = if resp.state.is_removed() {
            debug!(type_name = %self.type_name, "resource removed during refresh");
            None
        } else {
            Some(resp.state)
        };
        Ok(())
    }

    /// Run Delete; the row is dropped only when it succeeds.
    pub async fn destroy(&mut self) -> Result<(), Diagnostics> {
        let Some(state) = self.state.clone() else {
            return Ok(());
        };

        let mut resp = DeleteResponse::default();
        self.resource
            .delete(&self.ctx, &DeleteRequest { state }, &mut resp)
            .await;
        if resp.diagnostics.has_error() {
            return Err(resp.diagnostics);
        }
        self.state = None;
        Ok(())
    }

    /// Run ImportState only, leaving the row as the import wrote it.
    pub fn import_state(&mut self, id: &str) -> Result<(), Diagnostics> {
        let mut resp = ImportStateResponse::default();
        let req = ImportStateRequest { id: id.to_string() };
        self.resource.import_state(&req, &mut resp);
        if resp.diagnostics.has_error() {
            return Err(resp.diagnostics);
        }
        self.state = Some(resp.state);
        Ok(())
    }

    /// Import followed by the Read the orchestrator always performs.
    pub async fn import(&mut self, id: &str) -> Result<(), Diagnostics> {
        self.import_state(id)?;
        self.refresh().await
    }
}
