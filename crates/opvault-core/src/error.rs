// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for opvault clients and resources.

use thiserror::Error;

/// The primary error type returned by [`VaultClient`](crate::VaultClient)
/// implementations and core operations.
#[derive(Debug, Error)]
pub enum OpError {
    /// Configuration errors (missing credentials, malformed values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote object does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// The backend refuses the operation outright (e.g. 1Password Connect
    /// has no vault management endpoints).
    #[error("{operation} is not supported with 1Password Connect")]
    Unsupported { operation: String },

    /// The remote service answered with a non-success status.
    #[error("status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connect, TLS, decode, timeout).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The orchestrator cancelled the operation while it was in flight.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OpError {
    /// Shorthand for a not-found error on a vault.
    pub fn vault_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "vault".to_string(),
            id: id.into(),
        }
    }

    /// Shorthand for a backend refusal of the named operation.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }
}
