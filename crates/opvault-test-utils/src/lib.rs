// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for opvault integration tests.
//!
//! Provides an in-memory vault backend and a harness that drives a resource
//! through plan/apply/refresh/import cycles the way the orchestrator does,
//! without a 1Password server.
//!
//! # Components
//!
//! - [`MockVaultClient`] - In-memory `VaultClient` with failure injection and a call log
//! - [`ResourceHarness`] - Orchestrator stand-in that keeps the state row between cycles

pub mod harness;
pub mod mock_client;

pub use harness::{PlanAction, ResourceHarness};
pub use mock_client::{Call, MockVaultClient, Operation};
