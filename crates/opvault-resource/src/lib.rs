// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `onepassword_vault` managed resource.
//!
//! [`VaultResource`] implements the create/read/update/delete/import
//! lifecycle against any [`opvault_core::VaultClient`]. The identifier codec
//! lives in [`id`], the attribute surface in [`schema`], and the error
//! classification Read relies on in [`classify`].

pub mod classify;
pub mod id;
pub mod model;
pub mod resource;
pub mod schema;

pub use classify::{ErrorClass, classify};
pub use model::VaultResourceModel;
pub use resource::{VaultResource, new_vault_resource};
pub use schema::vault_schema;
