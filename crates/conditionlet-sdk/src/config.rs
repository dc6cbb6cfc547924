//! Configuration types for ConditionEngine
//!
//! Settings are layered: defaults, then an optional `config/conditionlets`
//! file (`.yaml`, `.toml` or `.json`), then `CONDITIONLET_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `CONDITIONLET_REGEX__MAX_PATTERN_LEN=256`; lists are comma separated,
//! e.g. `CONDITIONLET_IP_HEADERS=CF-Connecting-IP,X-Forwarded-For`.

use crate::error::{Result, SdkError};
use conditionlet_core::DiagnosticsSink;
use conditionlet_runtime::context::DEFAULT_IP_HEADERS;
use conditionlet_runtime::{ClientIpResolver, ConditionletSettings, NetmaskPolicy, RegexLimits};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

const DEFAULT_CONFIG_FILE: &str = "config/conditionlets";
const DEFAULT_ENV_PREFIX: &str = "CONDITIONLET";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Headers consulted for the client address, in order
    pub ip_headers: Vec<String>,

    /// Compilation limits for `regex` comparisons
    pub regex: RegexLimits,

    /// Accept IPv6 networks in `netmask` comparisons
    pub allow_ipv6_netmask: bool,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Default tracing filter when `RUST_LOG` is unset, applied by
    /// [`init_tracing_from`](crate::logging::init_tracing_from)
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            ip_headers: DEFAULT_IP_HEADERS.iter().map(|h| h.to_string()).collect(),
            regex: RegexLimits::default(),
            allow_ipv6_netmask: true,
            enable_metrics: true,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX)
    }

    /// Load from a specific config file base name and environment prefix
    pub fn load_from(file: &str, env_prefix: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(false))
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ip_headers")
                    .try_parsing(true),
            )
            .build()?;

        let config: EngineConfig = settings.try_deserialize()?;
        config.validate()?;
        tracing::debug!(?config, "Loaded engine configuration");
        Ok(config)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.ip_headers.is_empty() {
            return Err(SdkError::ConfigError(
                "ip_headers must name at least one header".to_string(),
            ));
        }
        if self.ip_headers.iter().any(|h| h.trim().is_empty()) {
            return Err(SdkError::ConfigError(
                "ip_headers must not contain blank names".to_string(),
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(SdkError::ConfigError("log_level must not be blank".to_string()));
        }
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.log_level) {
            return Err(SdkError::ConfigError(format!(
                "log_level '{}' is not a valid filter: {}",
                self.log_level, e
            )));
        }
        if self.regex.max_pattern_len == 0 {
            return Err(SdkError::ConfigError(
                "regex.max_pattern_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the forwarding headers
    pub fn with_ip_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ip_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set regex limits
    pub fn with_regex_limits(mut self, limits: RegexLimits) -> Self {
        self.regex = limits;
        self
    }

    /// Accept or reject IPv6 netmasks
    pub fn allow_ipv6_netmask(mut self, allow: bool) -> Self {
        self.allow_ipv6_netmask = allow;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    pub fn netmask_policy(&self) -> NetmaskPolicy {
        NetmaskPolicy {
            allow_ipv6: self.allow_ipv6_netmask,
        }
    }

    pub fn ip_resolver(&self) -> ClientIpResolver {
        ClientIpResolver::new(self.ip_headers.iter().cloned())
    }

    /// Settings handed to the built-in conditionlets
    pub fn conditionlet_settings(&self, diagnostics: Arc<dyn DiagnosticsSink>) -> ConditionletSettings {
        ConditionletSettings::new()
            .with_regex_limits(self.regex)
            .with_netmask_policy(self.netmask_policy())
            .with_diagnostics(diagnostics)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
