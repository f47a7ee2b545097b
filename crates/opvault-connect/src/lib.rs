// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! 1Password Connect backend for opvault.
//!
//! [`ConnectClient`] implements [`VaultClient`](opvault_core::VaultClient)
//! over the Connect REST API. Connect can read vaults but cannot manage
//! them, so mutations come back as backend refusals.

pub mod client;
pub mod types;

pub use client::ConnectClient;
