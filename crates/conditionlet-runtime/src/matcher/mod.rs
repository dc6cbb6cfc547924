//! Matchers shared by the built-in conditionlets
//!
//! - Text comparisons (equality, prefix, suffix, substring)
//! - CIDR containment (`netmask`)
//! - Bounded regular expression find (`regex`)

pub mod netmask;
pub mod regex;

pub use self::netmask::{matches_netmask, parse_network, NetmaskPolicy};
pub use self::regex::{RegexCache, RegexLimits};

use conditionlet_core::Operator;

/// Apply a textual operator
///
/// Returns `None` for operators that are not plain text comparisons.
/// `Is`/`IsNot` ignore case; prefix, suffix and substring tests do not.
pub fn matches_text(op: Operator, actual: &str, expected: &str) -> Option<bool> {
    match op {
        Operator::Is | Operator::IsNot => Some(equals_ignore_case(actual, expected) != op.is_negated()),
        Operator::StartsWith => Some(actual.starts_with(expected)),
        Operator::EndsWith => Some(actual.ends_with(expected)),
        Operator::Contains => Some(actual.contains(expected)),
        Operator::Netmask | Operator::Regex | Operator::Exists => None,
    }
}

fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
