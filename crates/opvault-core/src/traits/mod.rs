// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by backend clients.
//!
//! Traits use `#[async_trait]` so they stay object-safe behind `Arc<dyn _>`.

pub mod client;

pub use client::VaultClient;
