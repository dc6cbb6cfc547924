//! Input schema and configured values

use serde::{Deserialize, Serialize};

/// A configuration field declared by a conditionlet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionletInput {
    /// Identifier, unique within the owning conditionlet
    pub id: String,

    /// Whether free text is accepted
    pub user_input_allowed: bool,

    /// Whether more than one value may be selected
    pub multiple_selection_allowed: bool,

    /// Enumerated choices; when set and free text is not allowed, values
    /// must be one of these
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl ConditionletInput {
    /// A free-text, single-value field
    pub fn text(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_input_allowed: true,
            multiple_selection_allowed: false,
            allowed_values: None,
        }
    }

    /// A field restricted to an enumerated set of values
    pub fn select<I, S>(id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            user_input_allowed: false,
            multiple_selection_allowed: false,
            allowed_values: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Allow multiple selections
    pub fn with_multiple_selection(mut self, allowed: bool) -> Self {
        self.multiple_selection_allowed = allowed;
        self
    }

    /// Returns true if `value` is acceptable for this field's enumeration
    pub fn accepts(&self, value: &str) -> bool {
        match &self.allowed_values {
            Some(allowed) if !self.user_input_allowed => allowed.iter().any(|v| v == value),
            _ => true,
        }
    }
}

/// A configured value bound to a declared input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionletInputValue {
    /// Id of the `ConditionletInput` this value belongs to
    pub conditionlet_input_id: String,
    /// Raw value
    pub value: String,
}

impl ConditionletInputValue {
    pub fn new(input_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            conditionlet_input_id: input_id.into(),
            value: value.into(),
        }
    }
}

/// A raw value handed to `evaluate`, before it is bound to an input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionValue {
    pub value: String,
}

impl ConditionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::new(value)
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::new(value)
    }
}
