//! Conditionlet Runtime - Built-in conditionlets and their registry
//!
//! This crate provides the evaluation side of the rule condition engine:
//! the built-in conditionlets, the matchers they share, a transport-neutral
//! request context, diagnostics sinks and the registry the rule orchestrator
//! resolves conditionlets from.

pub mod conditionlets;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod registry;

// Re-export main types
pub use conditionlets::{
    ConditionletSettings, RequestHeaderConditionlet, UsersIpAddressConditionlet,
    REQUEST_HEADER_ID, USERS_IP_ADDRESS_ID,
};
pub use context::{ClientIpResolver, Headers, HttpRequestContext};
pub use diagnostics::{CollectingDiagnostics, Diagnostic, TracingDiagnostics};
pub use error::{MatchError, Result, RuntimeError};
pub use matcher::{NetmaskPolicy, RegexCache, RegexLimits};
pub use registry::ConditionletRegistry;
