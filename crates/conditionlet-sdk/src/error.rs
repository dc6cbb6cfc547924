//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration source could not be read or merged
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] conditionlet_runtime::RuntimeError),

    /// Tracing subscriber could not be installed
    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
