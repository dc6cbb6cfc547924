//! Diagnostics capability
//!
//! Non-fatal problems found while evaluating (unresolvable client address,
//! malformed netmask, rejected pattern) are reported here. Reporting never
//! changes the outcome of an evaluation.

use std::error::Error;

/// Receiver for non-fatal evaluation problems
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, component: &str, message: &str, error: Option<&(dyn Error + 'static)>);
}
