//! Evaluation metrics

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters updated by the engine on every call
#[derive(Debug, Default)]
pub(crate) struct EngineMetrics {
    evaluations: AtomicU64,
    matches: AtomicU64,
    unknown_conditionlets: AtomicU64,
    validations: AtomicU64,
    evaluation_nanos: AtomicU64,
}

impl EngineMetrics {
    pub(crate) fn record_evaluation(&self, matched: bool, elapsed: Duration) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matches.fetch_add(1, Ordering::Relaxed);
        }
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.evaluation_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub(crate) fn record_unknown_conditionlet(&self) {
        self.unknown_conditionlets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> EvaluationMetrics {
        EvaluationMetrics {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            unknown_conditionlets: self.unknown_conditionlets.load(Ordering::Relaxed),
            validations: self.validations.load(Ordering::Relaxed),
            evaluation_nanos: self.evaluation_nanos.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationMetrics {
    /// Evaluations that reached a conditionlet
    pub evaluations: u64,
    /// Evaluations that returned `true`
    pub matches: u64,
    /// Evaluations and validations naming an unregistered conditionlet
    pub unknown_conditionlets: u64,
    /// Validation requests served
    pub validations: u64,
    /// Time spent inside conditionlets
    pub evaluation_nanos: u64,
}

impl EvaluationMetrics {
    /// Mean time per evaluation
    pub fn average_evaluation_time(&self) -> Duration {
        if self.evaluations == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(self.evaluation_nanos / self.evaluations)
        }
    }

    /// Fraction of evaluations that matched
    pub fn match_rate(&self) -> f64 {
        if self.evaluations == 0 {
            0.0
        } else {
            self.matches as f64 / self.evaluations as f64
        }
    }
}
