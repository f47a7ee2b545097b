// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan and state objects exchanged with the orchestrator.

use std::collections::BTreeMap;

use crate::framework::diagnostics::Diagnostics;
use crate::framework::value::AttrValue;

/// A typed view over a [`State`].
///
/// `from_state` reports conversion problems into `diags` and returns `None`
/// when the state cannot be decoded.
pub trait StateModel: Sized {
    /// Attribute names this model understands.
    const ATTRIBUTES: &'static [&'static str];

    fn from_state(state: &State, diags: &mut Diagnostics) -> Option<Self>;

    fn to_state(&self, state: &mut State);
}

/// Attribute values of one resource instance, in plan or state form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    values: BTreeMap<String, AttrValue>,
    removed: bool,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from `(name, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            removed: false,
        }
    }

    /// Value of an attribute; absent attributes read as null.
    pub fn get_attribute(&self, name: &str) -> AttrValue {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(name.into(), value.into());
        self.removed = false;
    }

    /// Decode into a typed model, appending any conversion diagnostics.
    ///
    /// Attributes the model does not know about are a conversion error.
    pub fn get<M: StateModel>(&self, diags: &mut Diagnostics) -> Option<M> {
        let mut ok = true;
        for name in self.values.keys() {
            if !M::ATTRIBUTES.contains(&name.as_str()) {
                diags.add_attribute_error(
                    name.clone(),
                    "Value Conversion Error",
                    format!("attribute \"{name}\" has no corresponding field in the resource model"),
                );
                ok = false;
            }
        }
        if !ok {
            return None;
        }
        M::from_state(self, diags)
    }

    /// Overwrite this state with the model's attributes.
    pub fn set<M: StateModel>(&mut self, model: &M) {
        self.values.clear();
        self.removed = false;
        model.to_state(self);
    }

    /// Drop the resource from state. The orchestrator will plan a create.
    pub fn remove_resource(&mut self) {
        self.values.clear();
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a JSON object. Null and unknown values render as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(k, v)| {
                let value = match v.as_known() {
                    Some(s) => serde_json::Value::String(s.to_string()),
                    None => serde_json::Value::Null,
                };
                (k.clone(), value)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
