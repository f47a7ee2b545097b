// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resource lifecycle contract and its request/response types.
//!
//! Responses own the [`Diagnostics`] accumulator; handlers append to it
//! rather than returning errors.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::OpError;
use crate::framework::diagnostics::Diagnostics;
use crate::framework::schema::Schema;
use crate::framework::state::State;

/// Opaque value handed from the provider's configure step to each resource.
///
/// Keeps the concrete type name so a mismatch can be reported.
pub struct ProviderData {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ProviderData {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderData")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataRequest {
    pub provider_type_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MetadataResponse {
    pub type_name: String,
}

#[derive(Debug, Default)]
pub struct ConfigureRequest {
    pub provider_data: Option<Arc<ProviderData>>,
}

#[derive(Debug, Default)]
pub struct ConfigureResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub plan: State,
}

#[derive(Debug, Clone, Default)]
pub struct CreateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    pub state: State,
}

/// `state` starts as a copy of the request state; a handler that leaves it
/// untouched preserves the row.
#[derive(Debug, Clone, Default)]
pub struct ReadResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn for_request(req: &ReadRequest) -> Self {
        Self {
            state: req.state.clone(),
            diagnostics: Diagnostics::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub plan: State,
    pub prior_state: State,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub state: State,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct ImportStateRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImportStateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

/// A managed resource type.
///
/// Every async handler receives the orchestrator's cancellation token and
/// must not outlive it.
#[async_trait]
pub trait Resource: Send + Sync {
    fn metadata(&self, req: &MetadataRequest, resp: &mut MetadataResponse);

    fn schema(&self) -> Schema;

    fn configure(&mut self, req: &ConfigureRequest, resp: &mut ConfigureResponse);

    async fn create(&self, ctx: &CancellationToken, req: &CreateRequest, resp: &mut CreateResponse);

    async fn read(&self, ctx: &CancellationToken, req: &ReadRequest, resp: &mut ReadResponse);

    async fn update(&self, ctx: &CancellationToken, req: &UpdateRequest, resp: &mut UpdateResponse);

    async fn delete(&self, ctx: &CancellationToken, req: &DeleteRequest, resp: &mut DeleteResponse);
}

/// A resource that can adopt pre-existing remote objects.
pub trait ResourceWithImportState: Resource {
    fn import_state(&self, req: &ImportStateRequest, resp: &mut ImportStateResponse);
}

/// Run a remote call, aborting it if `ctx` is cancelled first.
///
/// The in-flight future is dropped on cancellation.
pub async fn cancellable<T, F>(ctx: &CancellationToken, call: F) -> Result<T, OpError>
where
    F: Future<Output = Result<T, OpError>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(OpError::Cancelled),
        result = call => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_data_reports_concrete_type() {
        let data = ProviderData::new(42_u32);
        assert_eq!(data.type_name(), "u32");
        assert_eq!(data.downcast_ref::<u32>(), Some(&42));
        assert!(data.downcast_ref::<String>().is_none());
    }

    #[tokio::test]
    async fn cancellable_passes_through_result() {
        let ctx = CancellationToken::new();
        let result = cancellable(&ctx, async { Ok::<_, OpError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn cancellable_aborts_pending_call() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let result: Result<(), OpError> = cancellable(&ctx, std::future::pending()).await;
        assert!(matches!(result, Err(OpError::Cancelled)));
    }
}
