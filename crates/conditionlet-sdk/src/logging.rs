//! Tracing initialization for hosts

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| SdkError::TracingInit(e.to_string()))
}

/// Install a global fmt subscriber filtered by `config.log_level`
pub fn init_tracing_from(config: &EngineConfig) -> Result<()> {
    init_tracing(&config.log_level)
}
