//! Built-in conditionlets
//!
//! | Id | Inspects |
//! |----|----------|
//! | `UsersIpAddress` | resolved client IP address |
//! | `RequestHeader` | a named request header |

mod ip_address;
mod request_header;

pub use ip_address::{UsersIpAddressConditionlet, USERS_IP_ADDRESS_ID};
pub use request_header::{RequestHeaderConditionlet, REQUEST_HEADER_ID};

use crate::diagnostics::TracingDiagnostics;
use crate::matcher::{NetmaskPolicy, RegexLimits};
use conditionlet_core::DiagnosticsSink;
use std::fmt;
use std::sync::Arc;

/// Settings shared by the built-in conditionlets
#[derive(Clone)]
pub struct ConditionletSettings {
    pub regex: RegexLimits,
    pub netmask: NetmaskPolicy,
    pub diagnostics: Arc<dyn DiagnosticsSink>,
}

impl ConditionletSettings {
    pub fn new() -> Self {
        Self {
            regex: RegexLimits::default(),
            netmask: NetmaskPolicy::default(),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_regex_limits(mut self, limits: RegexLimits) -> Self {
        self.regex = limits;
        self
    }

    pub fn with_netmask_policy(mut self, policy: NetmaskPolicy) -> Self {
        self.netmask = policy;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

impl Default for ConditionletSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionletSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionletSettings")
            .field("regex", &self.regex)
            .field("netmask", &self.netmask)
            .finish_non_exhaustive()
    }
}
