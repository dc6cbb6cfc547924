//! Client IP address conditionlet
//!
//! Compares the address of the client that issued the request against a
//! configured address, prefix, network or pattern. The address is taken
//! from the request context, which looks through forwarding headers before
//! falling back to the connection's peer.

use super::ConditionletSettings;
use crate::context::canonical_ip;
use crate::matcher::{self, matches_netmask, parse_network, RegexCache};
use conditionlet_core::validation::{bind_values, validate_input_values, validate_input_values_with};
use conditionlet_core::{
    Comparison, ConditionValue, Conditionlet, ConditionletInput, ConditionletInputValue, Operator,
    RequestContext, ValidationResults,
};
use std::net::IpAddr;
use tracing::debug;

/// Registry id
pub const USERS_IP_ADDRESS_ID: &str = "UsersIpAddress";

const NAME: &str = "User's IP Address";
const INPUT_ID: &str = "ip-address";

const COMPARISONS: [Operator; 5] = [
    Operator::Is,
    Operator::IsNot,
    Operator::StartsWith,
    Operator::Netmask,
    Operator::Regex,
];

/// Matches the requester's IP address
///
/// Comparisons: `is`, `isNot`, `startsWith`, `netmask`, `regex`.
/// One free-text input, `ip-address`. When several values are supplied all
/// of them must validate, but only the first takes part in matching.
/// `is`/`isNot` compare addresses, so any textual form of the same address
/// (`2001:db8::1`, `2001:db8:0:0:0:0:0:1`, `::ffff:10.0.0.1`) is equal.
pub struct UsersIpAddressConditionlet {
    comparisons: Vec<Comparison>,
    inputs: Vec<ConditionletInput>,
    patterns: RegexCache,
    settings: ConditionletSettings,
}

impl UsersIpAddressConditionlet {
    pub fn new(settings: ConditionletSettings) -> Self {
        Self {
            comparisons: COMPARISONS.iter().copied().map(Comparison::from).collect(),
            inputs: vec![ConditionletInput::text(INPUT_ID)],
            patterns: RegexCache::new(settings.regex),
            settings,
        }
    }

    fn operator(comparison_id: &str) -> Option<Operator> {
        Operator::from_id(comparison_id).filter(|op| COMPARISONS.contains(op))
    }

    /// Comparand checks the structural validation cannot make
    fn check_comparand(&self, op: Option<Operator>, value: &ConditionletInputValue) -> Result<(), String> {
        match op {
            Some(Operator::Netmask) => parse_network(&value.value, &self.settings.netmask)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Some(Operator::Regex) => self
                .settings
                .regex
                .compile(&value.value)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            _ => Ok(()),
        }
    }

    fn matches(&self, op: Operator, ip: IpAddr, expected: &str) -> bool {
        if matches!(op, Operator::Is | Operator::IsNot) {
            if let Ok(configured) = expected.trim().parse::<IpAddr>() {
                return (canonical_ip(configured) == canonical_ip(ip)) != op.is_negated();
            }
        }

        let actual = ip.to_string();
        if let Some(result) = matcher::matches_text(op, &actual, expected) {
            return result;
        }

        let outcome = match op {
            Operator::Netmask => matches_netmask(ip, expected, &self.settings.netmask),
            Operator::Regex => self.patterns.find(expected, &actual),
            _ => Ok(false),
        };

        outcome.unwrap_or_else(|e| {
            self.settings.diagnostics.report(
                USERS_IP_ADDRESS_ID,
                &format!("Cannot apply '{}' comparison to '{}'", op, expected),
                Some(&e),
            );
            false
        })
    }
}

impl Default for UsersIpAddressConditionlet {
    fn default() -> Self {
        Self::new(ConditionletSettings::default())
    }
}

impl Conditionlet for UsersIpAddressConditionlet {
    fn id(&self) -> &str {
        USERS_IP_ADDRESS_ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    fn inputs(&self, _comparison_id: &str) -> &[ConditionletInput] {
        &self.inputs
    }

    fn validate(&self, comparison_id: &str, values: &[ConditionletInputValue]) -> ValidationResults {
        let op = Self::operator(comparison_id);
        validate_input_values_with(comparison_id, &self.comparisons, &self.inputs, values, |value| {
            self.check_comparand(op, value)
        })
    }

    fn evaluate(&self, ctx: &dyn RequestContext, comparison_id: &str, values: &[ConditionValue]) -> bool {
        let Some(first) = values.first() else {
            return false;
        };
        if comparison_id.trim().is_empty() {
            return false;
        }
        let Some(op) = Self::operator(comparison_id) else {
            debug!(comparison = comparison_id, "Unknown comparison for {}", USERS_IP_ADDRESS_ID);
            return false;
        };

        let ip = match ctx.resolve_client_ip() {
            Ok(ip) => ip,
            Err(e) => {
                let message = format!(
                    "Could not retrieve a valid IP address from request: {}",
                    ctx.request_url().unwrap_or("<unknown url>")
                );
                self.settings
                    .diagnostics
                    .report(USERS_IP_ADDRESS_ID, &message, Some(&e));
                return false;
            }
        };

        // Comparand errors are reported by `matches`, so the gate only
        // checks structure here.
        let bound = bind_values(&self.inputs, values);
        let validation = validate_input_values(comparison_id, &self.comparisons, &self.inputs, &bound);
        if validation.has_errors() {
            debug!(
                comparison = comparison_id,
                errors = ?validation.error_messages(),
                "Configuration failed validation, not matching"
            );
            return false;
        }

        let matched = self.matches(op, ip, &first.value);
        debug!(comparison = comparison_id, %ip, matched, "Evaluated {}", USERS_IP_ADDRESS_ID);
        matched
    }
}
