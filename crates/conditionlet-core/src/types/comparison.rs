//! Comparison value object

use crate::operator::Operator;
use serde::{Deserialize, Serialize};

/// One selectable operator of a conditionlet
///
/// The `id` is what rule configuration stores; the `label` is only for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    /// Stable identifier, unique within a conditionlet
    pub id: String,
    /// Display label
    pub label: String,
}

impl Comparison {
    /// Create a comparison with a custom id
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Decode the id into a built-in operator, if it is one
    pub fn operator(&self) -> Option<Operator> {
        Operator::from_id(&self.id)
    }
}

impl From<Operator> for Comparison {
    fn from(op: Operator) -> Self {
        Comparison::new(op.id(), op.label())
    }
}
