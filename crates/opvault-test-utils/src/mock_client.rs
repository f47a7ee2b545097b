// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory vault backend for deterministic testing.
//!
//! `MockVaultClient` implements `VaultClient` over a map of vaults, so
//! lifecycle tests run without a 1Password server. Failures and stalls can be
//! queued per operation, and every call is recorded.

use std::collections::{BTreeMap, HashMap, VecDeque};

use async_trait::async_trait;
use strum::Display;
use tokio::sync::Mutex;
use tracing::debug;

use opvault_core::{OpError, Vault, VaultClient};

/// The four remote operations, used to target injected behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

/// A recorded call, with the arguments as the client received them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { name: String, description: String },
    Get(String),
    Update(Vault),
    Delete(String),
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::Create { .. } => Operation::Create,
            Call::Get(_) => Operation::Get,
            Call::Update(_) => Operation::Update,
            Call::Delete(_) => Operation::Delete,
        }
    }
}

enum Behavior {
    Fail(OpError),
    /// Never completes; only cancellation ends the call.
    Stall,
}

#[derive(Default)]
struct Inner {
    vaults: BTreeMap<String, Vault>,
    behaviors: HashMap<Operation, VecDeque<Behavior>>,
    calls: Vec<Call>,
    ids: VecDeque<String>,
    next_seq: u64,
    connect: bool,
}

impl Inner {
    fn next_id(&mut self) -> String {
        self.ids.pop_front().unwrap_or_else(|| {
            self.next_seq += 1;
            format!("mock-vault-{}", self.next_seq)
        })
    }
}

/// A mock 1Password backend.
///
/// Names and descriptions are trimmed on write, standing in for server-side
/// normalization, so tests can check that handlers keep the returned values.
pub struct MockVaultClient {
    inner: Mutex<Inner>,
}

impl MockVaultClient {
    /// Create an empty backend that accepts every operation.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Create a backend that refuses vault mutations the way
    /// 1Password Connect does.
    pub fn connect() -> Self {
        let mut client = Self::new();
        client.inner.get_mut().connect = true;
        client
    }

    /// Seed an existing vault.
    pub fn with_vault(mut self, vault: Vault) -> Self {
        self.inner.get_mut().vaults.insert(vault.id.clone(), vault);
        self
    }

    /// UUIDs handed out by successive creates, before falling back to
    /// generated ones.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .get_mut()
            .ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Make the next call of `operation` fail with `err`.
    pub async fn fail_next(&self, operation: Operation, err: OpError) {
        self.push_behavior(operation, Behavior::Fail(err)).await;
    }

    /// Make the next call of `operation` hang until cancelled.
    pub async fn stall_next(&self, operation: Operation) {
        self.push_behavior(operation, Behavior::Stall).await;
    }

    /// Delete a vault behind the resource's back.
    pub async fn remove_vault(&self, uuid: &str) -> Option<Vault> {
        self.inner.lock().await.vaults.remove(uuid)
    }

    pub async fn vault(&self, uuid: &str) -> Option<Vault> {
        self.inner.lock().await.vaults.get(uuid).cloned()
    }

    pub async fn vault_count(&self) -> usize {
        self.inner.lock().await.vaults.len()
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.inner.lock().await.calls.clone()
    }

    /// Number of recorded calls of one operation.
    pub async fn call_count(&self, operation: Operation) -> usize {
        self.inner
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    async fn push_behavior(&self, operation: Operation, behavior: Behavior) {
        self.inner
            .lock()
            .await
            .behaviors
            .entry(operation)
            .or_default()
            .push_back(behavior);
    }

    /// Record the call and apply any queued behavior. The lock is released
    /// before a stall so the rest of the mock stays usable.
    async fn begin(&self, call: Call) -> Result<(), OpError> {
        let operation = call.operation();
        let behavior = {
            let mut inner = self.inner.lock().await;
            inner.calls.push(call);
            inner
                .behaviors
                .get_mut(&operation)
                .and_then(VecDeque::pop_front)
        };

        match behavior {
            None => Ok(()),
            Some(Behavior::Fail(err)) => Err(err),
            Some(Behavior::Stall) => {
                debug!(%operation, "mock call stalled");
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }

    async fn refuse_on_connect(&self, operation: &str) -> Result<(), OpError> {
        if self.inner.lock().await.connect {
            return Err(OpError::unsupported(operation));
        }
        Ok(())
    }
}

impl Default for MockVaultClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultClient for MockVaultClient {
    fn name(&self) -> &str {
        "mock-vault-client"
    }

    async fn create_vault(&self, vault: &Vault) -> Result<Vault, OpError> {
        self.begin(Call::Create {
            name: vault.name.clone(),
            description: vault.description.clone(),
        })
        .await?;
        self.refuse_on_connect("creating vaults").await?;

        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let created = Vault::new(vault.name.trim(), vault.description.trim()).with_id(id);
        inner.vaults.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn get_vault(&self, uuid: &str) -> Result<Vault, OpError> {
        self.begin(Call::Get(uuid.to_string())).await?;

        self.inner
            .lock()
            .await
            .vaults
            .get(uuid)
            .cloned()
            .ok_or_else(|| OpError::vault_not_found(uuid))
    }

    async fn update_vault(&self, vault: &Vault) -> Result<Vault, OpError> {
        self.begin(Call::Update(vault.clone())).await?;
        self.refuse_on_connect("updating vaults").await?;

        let mut inner = self.inner.lock().await;
        let Some(existing) = inner.vaults.get_mut(&vault.id) else {
            return Err(OpError::vault_not_found(&vault.id));
        };
        existing.name = vault.name.trim().to_string();
        existing.description = vault.description.trim().to_string();
        Ok(existing.clone())
    }

    async fn delete_vault(&self, uuid: &str) -> Result<(), OpError> {
        self.begin(Call::Delete(uuid.to_string())).await?;
        self.refuse_on_connect("deleting vaults").await?;

        match self.inner.lock().await.vaults.remove(uuid) {
            Some(_) => Ok(()),
            None => Err(OpError::vault_not_found(uuid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn create_assigns_queued_ids_then_generated() {
        let client = MockVaultClient::new().with_ids(["AAA"]);

        let first = client.create_vault(&Vault::new("Prod", "")).await.unwrap();
        let second = client.create_vault(&Vault::new("Dev", "")).await.unwrap();

        assert_eq!(first.id, "AAA");
        assert_eq!(second.id, "mock-vault-1");
        assert_eq!(client.vault_count().await, 2);
    }

    #[tokio::test]
    async fn writes_are_trimmed() {
        let client = MockVaultClient::new().with_ids(["AAA"]);
        let created = client
            .create_vault(&Vault::new("  Prod ", " secrets\n"))
            .await
            .unwrap();
        assert_eq!(created.name, "Prod");
        assert_eq!(created.description, "secrets");
    }

    #[tokio::test]
    async fn get_missing_vault_is_not_found() {
        let client = MockVaultClient::new();
        let err = client.get_vault("CCC").await.unwrap_err();
        assert!(matches!(err, OpError::NotFound { .. }));
    }

    #[tokio::test]
    async fn queued_failure_applies_once() {
        let client = MockVaultClient::new().with_vault(Vault::new("Prod", "").with_id("AAA"));
        client
            .fail_next(Operation::Get, OpError::Internal("boom".into()))
            .await;

        assert!(client.get_vault("AAA").await.is_err());
        assert!(client.get_vault("AAA").await.is_ok());
        assert_eq!(client.call_count(Operation::Get).await, 2);
    }

    #[tokio::test]
    async fn connect_mode_refuses_mutations() {
        let client = MockVaultClient::connect().with_vault(Vault::new("Prod", "").with_id("AAA"));

        let err = client.create_vault(&Vault::new("New", "")).await.unwrap_err();
        assert!(err.to_string().contains("not supported with 1Password Connect"));
        assert!(client.delete_vault("AAA").await.is_err());
        assert!(client.get_vault("AAA").await.is_ok());
        assert_eq!(client.vault_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_does_not_complete() {
        let client = MockVaultClient::new();
        client.stall_next(Operation::Delete).await;

        let result = tokio::time::timeout(Duration::from_secs(5), client.delete_vault("AAA")).await;
        assert!(result.is_err());
        // The lock was not held across the stall.
        assert_eq!(client.calls().await, vec![Call::Delete("AAA".into())]);
    }
}
