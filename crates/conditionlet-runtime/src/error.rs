//! Runtime error types

use thiserror::Error;

/// Registry and lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// No conditionlet registered under the id
    #[error("Conditionlet not found: {0}")]
    NotFound(String),

    /// Id already taken
    #[error("Conditionlet already registered: {0}")]
    DuplicateConditionlet(String),

    /// Blank or otherwise unusable id
    #[error("Invalid conditionlet id: {0:?}")]
    InvalidId(String),

    /// The process-wide registry can only be published once
    #[error("Global conditionlet registry already installed")]
    GlobalAlreadyInstalled,
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A comparand that cannot be used for matching
///
/// These never escape an evaluation; they are reported to diagnostics and
/// the evaluation fails closed.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Malformed network '{value}', expected address/prefix")]
    MalformedNetwork {
        value: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("IPv6 netmask matching is disabled: {0}")]
    Ipv6Disabled(String),

    #[error("Pattern of {len} bytes exceeds the {max} byte limit")]
    PatternTooLong { len: usize, max: usize },

    #[error("Invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
}
