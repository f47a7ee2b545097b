// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client capability consumed by the vault resource.

use async_trait::async_trait;

use crate::error::OpError;
use crate::types::Vault;

/// The remote operations a vault resource needs.
///
/// One client is shared by every resource configured from the same provider
/// block, so implementations must be safe for concurrent use. Returned vaults
/// carry the server's canonical values.
#[async_trait]
pub trait VaultClient: Send + Sync + 'static {
    /// Human-readable backend name, used in log fields.
    fn name(&self) -> &str;

    /// Create a vault. The `id` of the request is ignored.
    async fn create_vault(&self, vault: &Vault) -> Result<Vault, OpError>;

    /// Fetch a vault by UUID.
    async fn get_vault(&self, uuid: &str) -> Result<Vault, OpError>;

    /// Replace the name and description of the vault identified by `vault.id`.
    async fn update_vault(&self, vault: &Vault) -> Result<Vault, OpError>;

    /// Delete a vault by UUID.
    async fn delete_vault(&self, uuid: &str) -> Result<(), OpError>;
}
