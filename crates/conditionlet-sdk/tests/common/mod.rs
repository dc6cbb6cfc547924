//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use conditionlet_sdk::{
    CollectingDiagnostics, ConditionEngine, ConditionValue, EngineConfig, HttpRequestContext,
};
use std::net::IpAddr;
use std::sync::Arc;

/// Test helper wrapping an engine with collected diagnostics
pub struct TestEngine {
    pub engine: ConditionEngine,
    pub diagnostics: Arc<CollectingDiagnostics>,
}

impl TestEngine {
    /// Engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let engine = ConditionEngine::builder()
            .with_config(config)
            .with_diagnostics(diagnostics.clone())
            .build()
            .expect("engine should build");
        Self {
            engine,
            diagnostics,
        }
    }

    /// Request whose connection peer is `ip`
    pub fn request_from(&self, ip: &str) -> HttpRequestContext {
        let addr: IpAddr = ip.parse().expect("test address should parse");
        self.engine.request_context().with_peer_addr(addr)
    }

    /// Evaluate a conditionlet with a single configured value
    pub fn eval(&self, id: &str, ctx: &HttpRequestContext, comparison: &str, value: &str) -> bool {
        self.engine
            .evaluate(id, ctx, comparison, &[ConditionValue::new(value)])
    }

    /// Evaluate a conditionlet with positional values
    pub fn eval_values(&self, id: &str, ctx: &HttpRequestContext, comparison: &str, values: &[&str]) -> bool {
        let values: Vec<ConditionValue> = values.iter().map(|v| ConditionValue::new(*v)).collect();
        self.engine.evaluate(id, ctx, comparison, &values)
    }
}
