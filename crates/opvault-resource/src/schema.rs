// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attribute surface of the vault resource.

use opvault_core::framework::{PlanModifier, Schema, StringAttribute};

pub const ATTR_ID: &str = "id";
pub const ATTR_UUID: &str = "uuid";
pub const ATTR_NAME: &str = "name";
pub const ATTR_DESCRIPTION: &str = "description";

/// `id` and `uuid` are computed and, once known, stable; `name` is required;
/// `description` is optional and defaults to `""`.
pub fn vault_schema() -> Schema {
    Schema {
        markdown_description: "Manages a 1Password Vault.".to_string(),
        attributes: vec![
            StringAttribute::computed(ATTR_ID)
                .with_description(
                    "The Terraform resource identifier for this vault in the format `vaults/<vault_id>`.",
                )
                .with_plan_modifier(PlanModifier::UseStateForUnknown),
            StringAttribute::computed(ATTR_UUID)
                .with_description("The UUID of the vault.")
                .with_plan_modifier(PlanModifier::UseStateForUnknown),
            StringAttribute::required(ATTR_NAME).with_description("The name of the vault."),
            StringAttribute::optional(ATTR_DESCRIPTION)
                .and_computed()
                .with_description("The description of the vault.")
                .with_default(""),
        ],
    }
}
