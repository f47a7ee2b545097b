// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for opvault.
//!
//! This crate provides the error type, vault domain types, the
//! [`VaultClient`] capability that backend clients implement, and the
//! orchestrator framework vocabulary that resources are written against.

pub mod error;
pub mod framework;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OpError;
pub use traits::VaultClient;
pub use types::Vault;

pub use tokio_util::sync::CancellationToken;
