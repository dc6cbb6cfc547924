//! Error types for the conditionlet core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown comparison: {0}")]
    UnknownComparison(String),
}

/// Failure to obtain an attribute from the request context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No usable client address in headers or on the connection
    #[error("Could not resolve client IP address: {0}")]
    Unresolvable(String),

    /// A header carried something that is not an IP address
    #[error("Invalid IP address '{value}' in {source_name}")]
    InvalidAddress { source_name: String, value: String },
}
