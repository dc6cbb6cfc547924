//! Builder pattern for ConditionEngine

use crate::config::EngineConfig;
use crate::engine::ConditionEngine;
use crate::error::Result;
use conditionlet_core::{Conditionlet, DiagnosticsSink};
use conditionlet_runtime::{ConditionletRegistry, TracingDiagnostics};
use std::sync::Arc;

/// Builder for ConditionEngine
///
/// # Example
///
/// ```rust
/// use conditionlet_sdk::{ConditionEngineBuilder, EngineConfig, USERS_IP_ADDRESS_ID};
///
/// let engine = ConditionEngineBuilder::new()
///     .with_config(EngineConfig::new().with_ip_headers(["X-Real-IP"]))
///     .build()
///     .unwrap();
///
/// let ctx = engine.request_context().with_header("X-Real-IP", "10.1.2.3");
/// assert!(engine.evaluate(USERS_IP_ADDRESS_ID, &ctx, "netmask", &["10.1.0.0/16".into()]));
/// ```
pub struct ConditionEngineBuilder {
    config: EngineConfig,
    diagnostics: Option<Arc<dyn DiagnosticsSink>>,
    registry: Option<ConditionletRegistry>,
    include_builtins: bool,
    conditionlets: Vec<(String, Arc<dyn Conditionlet>)>,
}

impl ConditionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            diagnostics: None,
            registry: None,
            include_builtins: true,
            conditionlets: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Send diagnostics somewhere other than `tracing`
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Start from an existing registry instead of the built-ins
    ///
    /// Conditionlets in the registry keep the settings they were built with:
    /// the configured regex limits, netmask policy and diagnostics sink are
    /// not applied to them. Build the registry with
    /// [`EngineConfig::conditionlet_settings`] to share them.
    pub fn with_registry(mut self, registry: ConditionletRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Start from an empty registry
    pub fn without_builtins(mut self) -> Self {
        self.include_builtins = false;
        self
    }

    /// Register an additional conditionlet
    pub fn register(mut self, id: impl Into<String>, conditionlet: Arc<dyn Conditionlet>) -> Self {
        self.conditionlets.push((id.into(), conditionlet));
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Build the engine
    ///
    /// Fails on invalid configuration or a conflicting registration.
    pub fn build(self) -> Result<ConditionEngine> {
        self.config.validate()?;

        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics) as Arc<dyn DiagnosticsSink>);

        let mut registry = match self.registry {
            Some(registry) => {
                tracing::warn!(
                    conditionlets = ?registry.ids(),
                    "Using supplied registry; configured regex, netmask and diagnostics settings are not applied to it"
                );
                registry
            }
            None if self.include_builtins => ConditionletRegistry::with_builtins(
                self.config.conditionlet_settings(Arc::clone(&diagnostics)),
            ),
            None => ConditionletRegistry::new(),
        };

        for (id, conditionlet) in self.conditionlets {
            registry.register(id, conditionlet)?;
        }

        tracing::info!(conditionlets = ?registry.ids(), "Condition engine built");
        Ok(ConditionEngine::new(self.config, registry, diagnostics))
    }
}

impl Default for ConditionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use conditionlet_runtime::{RuntimeError, UsersIpAddressConditionlet, REQUEST_HEADER_ID, USERS_IP_ADDRESS_ID};

    #[test]
    fn test_default_build_has_builtins() {
        let engine = ConditionEngineBuilder::new().build().unwrap();
        assert_eq!(engine.registry().ids(), vec![REQUEST_HEADER_ID, USERS_IP_ADDRESS_ID]);
    }

    #[test]
    fn test_without_builtins() {
        let engine = ConditionEngineBuilder::new()
            .without_builtins()
            .register("ClientIp", Arc::new(UsersIpAddressConditionlet::default()))
            .build()
            .unwrap();
        assert_eq!(engine.registry().ids(), vec!["ClientIp"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = ConditionEngineBuilder::new()
            .register(USERS_IP_ADDRESS_ID, Arc::new(UsersIpAddressConditionlet::default()))
            .build();
        assert!(matches!(
            result,
            Err(SdkError::RuntimeError(RuntimeError::DuplicateConditionlet(_)))
        ));
    }

    #[test]
    fn test_invalid_config_fails() {
        let result = ConditionEngineBuilder::new()
            .with_config(EngineConfig::new().with_ip_headers(Vec::<String>::new()))
            .build();
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_supplied_registry_is_used() {
        let mut registry = ConditionletRegistry::new();
        registry
            .register("Ip", Arc::new(UsersIpAddressConditionlet::default()))
            .unwrap();
        let engine = ConditionEngineBuilder::new()
            .with_registry(registry)
            .enable_metrics(false)
            .build()
            .unwrap();
        assert_eq!(engine.registry().ids(), vec!["Ip"]);
        assert!(engine.metrics().is_none());
    }

    #[test]
    fn test_supplied_registry_keeps_its_own_settings() {
        use conditionlet_runtime::{ConditionletSettings, NetmaskPolicy};

        let strict = ConditionletSettings::new().with_netmask_policy(NetmaskPolicy { allow_ipv6: false });
        let engine = ConditionEngineBuilder::new()
            .with_config(EngineConfig::new().allow_ipv6_netmask(true))
            .with_registry(ConditionletRegistry::with_builtins(strict))
            .build()
            .unwrap();
        let ctx = engine.request_context().with_peer_addr("2001:db8::42".parse().unwrap());
        assert!(!engine.evaluate(USERS_IP_ADDRESS_ID, &ctx, "netmask", &["2001:db8::/32".into()]));

        let config = EngineConfig::new().allow_ipv6_netmask(true);
        let shared = config.conditionlet_settings(Arc::new(TracingDiagnostics));
        let engine = ConditionEngineBuilder::new()
            .with_config(config)
            .with_registry(ConditionletRegistry::with_builtins(shared))
            .build()
            .unwrap();
        assert!(engine.evaluate(USERS_IP_ADDRESS_ID, &ctx, "netmask", &["2001:db8::/32".into()]));
    }
}
