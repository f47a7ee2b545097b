// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource schema descriptors and plan computation.
//!
//! A [`Schema`] declares which attributes an operator writes, which the
//! provider computes, their static defaults and their plan modifiers.
//! [`Schema::plan`] turns operator config plus prior state into the planned
//! values a handler receives.

use serde::Serialize;
use strum::Display;

use crate::framework::diagnostics::Diagnostics;
use crate::framework::state::State;
use crate::framework::value::AttrValue;

/// Rules applied to a planned attribute value after defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Reuse the prior state value when the planned value is unknown, so a
    /// once-known computed attribute is not re-planned as unknown.
    UseStateForUnknown,
}

/// A string-typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringAttribute {
    pub name: String,
    pub markdown_description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
}

impl StringAttribute {
    fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            markdown_description: String::new(),
            required: false,
            optional: false,
            computed: false,
            default: None,
            plan_modifiers: Vec::new(),
        }
    }

    pub fn required(name: &str) -> Self {
        Self {
            required: true,
            ..Self::bare(name)
        }
    }

    pub fn optional(name: &str) -> Self {
        Self {
            optional: true,
            ..Self::bare(name)
        }
    }

    pub fn computed(name: &str) -> Self {
        Self {
            computed: true,
            ..Self::bare(name)
        }
    }

    /// Mark an optional attribute as also computed by the provider.
    pub fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.markdown_description = description.to_string();
        self
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn with_plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    fn is_read_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

/// Attribute surface of one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub markdown_description: String,
    pub attributes: Vec<StringAttribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&StringAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check the descriptor itself for contradictory flags.
    pub fn validate(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for attr in &self.attributes {
            if !attr.required && !attr.optional && !attr.computed {
                diags.add_attribute_error(
                    attr.name.clone(),
                    "Invalid Attribute Definition",
                    "attribute must be required, optional, or computed",
                );
            }
            if attr.required && (attr.optional || attr.computed) {
                diags.add_attribute_error(
                    attr.name.clone(),
                    "Invalid Attribute Definition",
                    "a required attribute cannot also be optional or computed",
                );
            }
            if attr.default.is_some() && !attr.computed {
                diags.add_attribute_error(
                    attr.name.clone(),
                    "Invalid Attribute Definition",
                    "an attribute with a default must also be computed",
                );
            }
        }
        diags
    }

    /// Compute the planned state for `config`, given the prior state of the
    /// instance (`None` when it does not exist yet).
    pub fn plan(&self, config: &State, prior: Option<&State>, diags: &mut Diagnostics) -> State {
        let mut planned = State::new();

        for attr in &self.attributes {
            let configured = config.get_attribute(&attr.name);

            if attr.required && configured.is_null() {
                diags.add_attribute_error(
                    attr.name.clone(),
                    "Missing required argument",
                    format!(
                        "The argument \"{}\" is required, but no definition was found.",
                        attr.name
                    ),
                );
            }
            if attr.is_read_only() && !configured.is_null() {
                diags.add_attribute_error(
                    attr.name.clone(),
                    "Invalid Configuration for Read-Only Attribute",
                    format!(
                        "Cannot set value for attribute \"{}\": it is computed by the provider.",
                        attr.name
                    ),
                );
            }

            let mut value = match configured {
                AttrValue::Null => match &attr.default {
                    Some(default) => AttrValue::known(default.clone()),
                    None if attr.computed => AttrValue::Unknown,
                    None => AttrValue::Null,
                },
                other => other,
            };

            for modifier in &attr.plan_modifiers {
                match modifier {
                    PlanModifier::UseStateForUnknown => {
                        if value.is_unknown() {
                            if let Some(prior) = prior {
                                let previous = prior.get_attribute(&attr.name);
                                if previous.is_known() {
                                    value = previous;
                                }
                            }
                        }
                    }
                }
            }

            planned.set_attribute(attr.name.clone(), value);
        }

        planned
    }
}
