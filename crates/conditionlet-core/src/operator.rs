//! Built-in comparison operators
//!
//! Stored rule configuration refers to comparisons by a stable string id.
//! The id is decoded once into an [`Operator`] so that dispatch is an
//! exhaustive `match` rather than a chain of string tests.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators understood by the built-in conditionlets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Exact equality (case-insensitive)
    Is,
    /// Negated equality
    IsNot,
    /// Textual prefix
    StartsWith,
    /// Textual suffix
    EndsWith,
    /// Substring
    Contains,
    /// CIDR containment
    Netmask,
    /// Regular expression find
    Regex,
    /// Presence of the inspected attribute
    Exists,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 8] = [
        Operator::Is,
        Operator::IsNot,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Contains,
        Operator::Netmask,
        Operator::Regex,
        Operator::Exists,
    ];

    /// Decode a stored comparison id. Matching is exact and case-sensitive.
    pub fn from_id(id: &str) -> Option<Operator> {
        match id {
            "is" => Some(Operator::Is),
            "isNot" => Some(Operator::IsNot),
            "startsWith" => Some(Operator::StartsWith),
            "endsWith" => Some(Operator::EndsWith),
            "contains" => Some(Operator::Contains),
            "netmask" => Some(Operator::Netmask),
            "regex" => Some(Operator::Regex),
            "exists" => Some(Operator::Exists),
            _ => None,
        }
    }

    /// Stable id used in stored rule configuration
    pub fn id(&self) -> &'static str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "isNot",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Contains => "contains",
            Operator::Netmask => "netmask",
            Operator::Regex => "regex",
            Operator::Exists => "exists",
        }
    }

    /// Display label for authoring surfaces
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Is => "Is",
            Operator::IsNot => "Is Not",
            Operator::StartsWith => "Starts With",
            Operator::EndsWith => "Ends With",
            Operator::Contains => "Contains",
            Operator::Netmask => "Matches Netmask",
            Operator::Regex => "Matches Regular Expression",
            Operator::Exists => "Exists",
        }
    }

    /// Returns true if the operator negates its match
    pub fn is_negated(&self) -> bool {
        matches!(self, Operator::IsNot)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_id(s).ok_or_else(|| CoreError::UnknownComparison(s.to_string()))
    }
}
