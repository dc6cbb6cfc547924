//! Condition engine facade
//!
//! Resolves conditionlets by id and forwards validation and evaluation to
//! them. Evaluation is total: an unknown conditionlet id simply does not
//! match. Validation is for authoring surfaces and reports an unknown id as
//! an error so the caller can reject the rule.

use crate::builder::ConditionEngineBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::metrics::{EngineMetrics, EvaluationMetrics};
use conditionlet_core::{
    Comparison, ConditionValue, Conditionlet, ConditionletInput, ConditionletInputValue,
    DiagnosticsSink, RequestContext, ValidationResults,
};
use conditionlet_runtime::{ClientIpResolver, ConditionletRegistry, HttpRequestContext, RuntimeError};
use std::sync::Arc;
use std::time::Instant;

const COMPONENT: &str = "ConditionEngine";

/// Entry point for rule orchestrators
pub struct ConditionEngine {
    config: EngineConfig,
    registry: ConditionletRegistry,
    diagnostics: Arc<dyn DiagnosticsSink>,
    ip_resolver: Arc<ClientIpResolver>,
    metrics: Option<EngineMetrics>,
}

impl ConditionEngine {
    pub(crate) fn new(
        config: EngineConfig,
        registry: ConditionletRegistry,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let ip_resolver = Arc::new(config.ip_resolver());
        let metrics = config.enable_metrics.then(EngineMetrics::default);
        Self {
            config,
            registry,
            diagnostics,
            ip_resolver,
            metrics,
        }
    }

    /// Start building an engine
    pub fn builder() -> ConditionEngineBuilder {
        ConditionEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConditionletRegistry {
        &self.registry
    }

    /// Resolve a conditionlet by id
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn Conditionlet>> {
        Ok(self.registry.resolve(id)?)
    }

    /// Comparisons declared by a conditionlet
    pub fn comparisons(&self, id: &str) -> Result<Vec<Comparison>> {
        Ok(self.resolve(id)?.comparisons().to_vec())
    }

    /// Input schema of a conditionlet for a comparison
    pub fn inputs(&self, id: &str, comparison_id: &str) -> Result<Vec<ConditionletInput>> {
        Ok(self.resolve(id)?.inputs(comparison_id).to_vec())
    }

    /// Validate configured values before a rule is stored
    pub fn validate(
        &self,
        id: &str,
        comparison_id: &str,
        values: &[ConditionletInputValue],
    ) -> Result<ValidationResults> {
        let conditionlet = self.registry.get(id).ok_or_else(|| {
            self.record(|m| m.record_unknown_conditionlet());
            RuntimeError::NotFound(id.to_string())
        })?;
        self.record(|m| m.record_validation());
        Ok(conditionlet.validate(comparison_id, values))
    }

    /// Evaluate a conditionlet against a request
    ///
    /// Never fails: unknown ids, missing context and bad configuration all
    /// yield `false`.
    pub fn evaluate(
        &self,
        id: &str,
        ctx: &dyn RequestContext,
        comparison_id: &str,
        values: &[ConditionValue],
    ) -> bool {
        let Some(conditionlet) = self.registry.get(id) else {
            self.record(|m| m.record_unknown_conditionlet());
            let err = RuntimeError::NotFound(id.to_string());
            self.diagnostics
                .report(COMPONENT, "Evaluation requested for an unregistered conditionlet", Some(&err));
            return false;
        };

        let start = Instant::now();
        let matched = conditionlet.evaluate(ctx, comparison_id, values);
        let elapsed = start.elapsed();
        self.record(|m| m.record_evaluation(matched, elapsed));

        tracing::trace!(conditionlet = id, comparison = comparison_id, matched, ?elapsed, "Condition evaluated");
        matched
    }

    /// A request context using the configured forwarding headers
    pub fn request_context(&self) -> HttpRequestContext {
        HttpRequestContext::new().with_resolver(Arc::clone(&self.ip_resolver))
    }

    /// Counters snapshot, when metrics are enabled
    pub fn metrics(&self) -> Option<EvaluationMetrics> {
        self.metrics.as_ref().map(EngineMetrics::snapshot)
    }

    fn record(&self, f: impl FnOnce(&EngineMetrics)) {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }
}
