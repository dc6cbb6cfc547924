//! Conditionlet SDK
//!
//! High-level API for hosting the rule condition engine: configuration
//! loading, an engine builder and a facade that resolves, validates and
//! evaluates conditionlets by id.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;

// Re-export main types
pub use builder::ConditionEngineBuilder;
pub use self::config::EngineConfig;
pub use engine::ConditionEngine;
pub use error::{Result, SdkError};
pub use logging::{init_tracing, init_tracing_from};
pub use metrics::EvaluationMetrics;

// Re-export commonly used types from dependencies
pub use conditionlet_core::{
    Comparison, ConditionValue, Conditionlet, ConditionletInput, ConditionletInputValue, Operator,
    RequestContext, ValidationResult, ValidationResults,
};
pub use conditionlet_runtime::{
    CollectingDiagnostics, ConditionletRegistry, HttpRequestContext, REQUEST_HEADER_ID,
    USERS_IP_ADDRESS_ID,
};
