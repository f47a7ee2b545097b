// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by clients and resources.

use serde::Deserialize;

/// A named container of secret items on the remote service.
///
/// `id` is the remote-assigned UUID. It is empty on create requests and
/// always populated on values returned by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Vault {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Vault {
    /// Build a create request: no id yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Attach a remote UUID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
