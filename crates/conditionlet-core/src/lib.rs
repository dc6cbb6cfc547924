//! Conditionlet Core - Core types and the conditionlet contract
//!
//! This crate provides the fundamental pieces shared by every condition type:
//! - Value objects (comparisons, inputs, configured values)
//! - Validation results and the validation pipeline
//! - The `Conditionlet` trait
//! - Capability traits consumed from the host (`RequestContext`, `DiagnosticsSink`)
//! - Error types

pub mod conditionlet;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod operator;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use conditionlet::Conditionlet;
pub use context::RequestContext;
pub use diagnostics::DiagnosticsSink;
pub use error::{ContextError, CoreError};
pub use operator::Operator;
pub use types::{
    Comparison, ConditionValue, ConditionletInput, ConditionletInputValue, ValidationResult,
    ValidationResults,
};
