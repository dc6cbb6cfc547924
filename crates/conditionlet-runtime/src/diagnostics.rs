//! Diagnostics sinks

use conditionlet_core::DiagnosticsSink;
use parking_lot::Mutex;
use std::error::Error;

/// Reports through `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, component: &str, message: &str, error: Option<&(dyn Error + 'static)>) {
        match error {
            Some(err) => tracing::warn!(component, error = %err, "{}", message),
            None => tracing::warn!(component, "{}", message),
        }
    }
}

/// A reported problem, as retained by [`CollectingDiagnostics`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub component: String,
    pub message: String,
    pub error: Option<String>,
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn report(&self, component: &str, message: &str, error: Option<&(dyn Error + 'static)>) {
        self.entries.lock().push(Diagnostic {
            component: component.to_string(),
            message: message.to_string(),
            error: error.map(|e| e.to_string()),
        });
    }
}
