// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! 1Password Connect wire types.

use opvault_core::Vault;
use serde::Deserialize;

/// A vault as returned by `GET /v1/vaults/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Version of the vault metadata.
    #[serde(default)]
    pub attribute_version: u32,
    /// Version of the vault contents.
    #[serde(default)]
    pub content_version: u32,
}

impl From<VaultResponse> for Vault {
    fn from(resp: VaultResponse) -> Self {
        Vault {
            id: resp.id,
            name: resp.name,
            description: resp.description.unwrap_or_default(),
        }
    }
}

/// Error body Connect returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}
