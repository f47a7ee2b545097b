// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Three-state attribute values as seen by the orchestrator.

/// A string attribute value in a plan or state.
///
/// `Unknown` is "known after apply"; `Null` is "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AttrValue {
    #[default]
    Null,
    Unknown,
    Known(String),
}

impl AttrValue {
    pub fn known(value: impl Into<String>) -> Self {
        Self::Known(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The known value, if any.
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }

    /// The known value, or `""` when null or unknown.
    pub fn value_str(&self) -> &str {
        self.as_known().unwrap_or_default()
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Known(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Known(value)
    }
}
