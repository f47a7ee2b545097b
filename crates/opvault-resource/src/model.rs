// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed view of a vault resource's plan or state.

use opvault_core::Vault;
use opvault_core::framework::{AttrValue, Diagnostics, State, StateModel};

use crate::id;
use crate::schema::{ATTR_DESCRIPTION, ATTR_ID, ATTR_NAME, ATTR_UUID};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultResourceModel {
    pub id: AttrValue,
    pub uuid: AttrValue,
    pub name: AttrValue,
    pub description: AttrValue,
}

impl VaultResourceModel {
    /// All four attributes from a vault returned by the remote.
    pub fn from_vault(vault: &Vault) -> Self {
        Self {
            id: AttrValue::known(id::compose(&vault.id)),
            uuid: AttrValue::known(vault.id.clone()),
            name: AttrValue::known(vault.name.clone()),
            description: AttrValue::known(vault.description.clone()),
        }
    }
}

impl StateModel for VaultResourceModel {
    const ATTRIBUTES: &'static [&'static str] = &[ATTR_ID, ATTR_UUID, ATTR_NAME, ATTR_DESCRIPTION];

    fn from_state(state: &State, _diags: &mut Diagnostics) -> Option<Self> {
        Some(Self {
            id: state.get_attribute(ATTR_ID),
            uuid: state.get_attribute(ATTR_UUID),
            name: state.get_attribute(ATTR_NAME),
            description: state.get_attribute(ATTR_DESCRIPTION),
        })
    }

    fn to_state(&self, state: &mut State) {
        state.set_attribute(ATTR_ID, self.id.clone());
        state.set_attribute(ATTR_UUID, self.uuid.clone());
        state.set_attribute(ATTR_NAME, self.name.clone());
        state.set_attribute(ATTR_DESCRIPTION, self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vault_composes_id() {
        let model = VaultResourceModel::from_vault(&Vault::new("Prod", "p").with_id("AAA"));
        assert_eq!(model.id, AttrValue::known("vaults/AAA"));
        assert_eq!(model.uuid, AttrValue::known("AAA"));
    }

    #[test]
    fn state_round_trip_keeps_unknowns() {
        let model = VaultResourceModel {
            id: AttrValue::known("vaults/EEE"),
            uuid: AttrValue::known("EEE"),
            name: AttrValue::Unknown,
            description: AttrValue::Unknown,
        };
        let mut state = State::new();
        state.set(&model);

        let mut diags = Diagnostics::new();
        let decoded: VaultResourceModel = state.get(&mut diags).unwrap();
        assert_eq!(decoded, model);
    }
}
